//! End-to-end session flows: greetings, typed queries, quick actions,
//! dictated input, spoken replies, and teardown.

use campushelp_chat::{ChatSession, SessionEvent, Topic, QUICK_ACTIONS};
use campushelp_core::config::ChatConfig;
use campushelp_core::events::AssistantEvent;
use campushelp_core::types::Sender;
use campushelp_voice::{
    Capability, ManualSynthesis, Recognizer, ScriptedRecognition, SpeechSettings, Synthesizer,
};
use tokio::sync::mpsc::UnboundedReceiver;

async fn pump(
    session: &mut ChatSession,
    rx: &mut UnboundedReceiver<SessionEvent>,
) -> Vec<AssistantEvent> {
    let event = rx.recv().await.expect("session event");
    session.handle(event)
}

#[tokio::test(start_paused = true)]
async fn full_conversation_flow() {
    let config = ChatConfig::default();
    let controller = ManualSynthesis::new();
    let recognizer = Recognizer::new(Box::new(ScriptedRecognition::new(vec![
        "when are my upcoming exams?".to_string(),
    ])));
    let synthesizer = Synthesizer::new(
        Box::new(controller.clone()),
        SpeechSettings::default(),
    );

    let (mut session, mut rx) = ChatSession::new(
        &config,
        Capability::Available(recognizer),
        Capability::Available(synthesizer),
    );

    // Greetings are seeded as bot messages.
    assert_eq!(session.transcript().len(), 2);
    assert!(session
        .transcript()
        .messages()
        .iter()
        .all(|m| m.sender == Sender::Bot));

    // Typed query: user message immediately, delayed bot reply, spoken.
    session.submit_line("what are my fees this semester?");
    assert_eq!(session.transcript().len(), 3);

    pump(&mut session, &mut rx).await; // ReplyDue
    assert_eq!(session.transcript().len(), 4);
    assert_eq!(
        session.transcript().last().unwrap().text,
        Topic::Fees.reply()
    );

    pump(&mut session, &mut rx).await; // Started
    assert!(session.is_speaking());
    controller.finish_active();
    pump(&mut session, &mut rx).await; // Finished
    assert!(!session.is_speaking());

    // Dictated query: toggle, transcript fills the input, empty line sends.
    session.toggle_listening();
    pump(&mut session, &mut rx).await; // Transcript
    pump(&mut session, &mut rx).await; // Ended
    assert_eq!(session.input(), "when are my upcoming exams?");

    session.submit_line("");
    pump(&mut session, &mut rx).await; // ReplyDue
    assert_eq!(
        session.transcript().last().unwrap().text,
        Topic::Exams.reply()
    );

    // Drain the speak cycle for the exam reply.
    pump(&mut session, &mut rx).await; // Started
    controller.finish_active();
    pump(&mut session, &mut rx).await; // Finished

    // Quick action: library info.
    session.trigger_quick_action(5).unwrap();
    pump(&mut session, &mut rx).await; // SubmitPending
    pump(&mut session, &mut rx).await; // ReplyDue
    assert_eq!(
        session.transcript().last().unwrap().text,
        Topic::Library.reply()
    );
    assert_eq!(
        session.transcript().messages()[session.transcript().len() - 2].text,
        QUICK_ACTIONS[5].query
    );

    // Teardown with an utterance still in flight.
    pump(&mut session, &mut rx).await; // Started(library reply)
    assert!(session.is_speaking());
    let events = session.close();
    assert!(matches!(events[0], AssistantEvent::SessionClosed { .. }));
    assert!(!session.is_speaking());
    assert!(session.is_closed());
}

#[tokio::test(start_paused = true)]
async fn visual_only_host_degrades_gracefully() {
    let config = ChatConfig {
        greetings: Vec::new(),
        ..ChatConfig::default()
    };
    let (mut session, mut rx) = ChatSession::new(
        &config,
        Capability::Unavailable,
        Capability::Unavailable,
    );

    // Voice toggle is inert; text flow still works end to end.
    assert!(session.toggle_listening().is_empty());
    session.submit_line("show my class timetable");
    pump(&mut session, &mut rx).await;

    assert_eq!(
        session.transcript().last().unwrap().text,
        Topic::Schedule.reply()
    );
    assert!(!session.is_speaking());
    assert!(!session.is_listening());
}
