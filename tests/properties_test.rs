//! Property tests for the conversation engine and HTTP adapter

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use proptest::prelude::*;

use NaviChat::{
    flows::{FlowRegistry, TailLabels},
    state::{ChatTurn, ConversationEngine, SessionContext, TurnKind},
};

fn engine() -> ConversationEngine {
    let registry = FlowRegistry::new(&TailLabels::default()).unwrap();
    ConversationEngine::new(Arc::new(registry))
}

fn context_with(entries: &[(String, String)]) -> SessionContext {
    let mut context = SessionContext::new();
    for (key, value) in entries {
        context.capture(key, value);
    }
    context
}

proptest! {
    #[test]
    fn rejected_answers_never_advance_or_touch_context(
        answer in "[a-zA-Zあ-ん0-9０-９ ]{1,12}",
        entries in proptest::collection::vec(("[a-z]{1,6}", "[a-z0-9]{0,6}"), 0..4),
    ) {
        let trimmed = answer.trim();
        prop_assume!(!trimmed.is_empty());
        prop_assume!(trimmed != "17" && trimmed != "１７");

        let context = context_with(&entries);
        let turn = ChatTurn::answer("行方不明者の根拠", "s1", &answer, context.clone());
        let reply = engine().respond(turn).unwrap();

        prop_assert_eq!(reply.kind, TurnKind::Retry);
        prop_assert_eq!(reply.next.as_str(), "s1");
        prop_assert_eq!(reply.context, context);
        prop_assert!(reply.send_text.is_none());
    }

    #[test]
    fn hint_lookup_respects_bounds(index in -5i32..10) {
        let turn = ChatTurn::hint("真相", "s1", f64::from(index), SessionContext::new());
        let reply = engine().respond(turn).unwrap();

        prop_assert_eq!(reply.kind, TurnKind::Hint);
        prop_assert_eq!(reply.next.as_str(), "s1");
        // the first step of this flow carries two hints
        let expected = format!("🔍 ヒント{}：", index + 1);
        prop_assert_eq!(reply.prompt.starts_with(&expected), (0..2).contains(&index));
    }

    #[test]
    fn fractional_hint_indices_find_nothing(index in 0.01f64..1.99) {
        prop_assume!(index.fract() != 0.0);
        let turn = ChatTurn::hint("真相", "s1", index, SessionContext::new());
        let reply = engine().respond(turn).unwrap();

        prop_assert!(!reply.prompt.starts_with("🔍"));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn arbitrary_bodies_never_fail_the_server(body in proptest::collection::vec(any::<u8>(), 0..64)) {
        let response = tokio_test::block_on(helpers::post_raw(body));
        prop_assert!(
            response.status == StatusCode::OK || response.status == StatusCode::NOT_FOUND,
            "unexpected status {}",
            response.status
        );
    }
}
