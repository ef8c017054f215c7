// tests/router_dispatch.rs
use std::sync::Arc;

use contribution_router::config::RouterConfig;
use contribution_router::contributions::memory::Collaborators;
use contribution_router::{Contribution, ContributionSource, ContributionType};

fn collaborators(linked: bool) -> Collaborators {
    let mut cfg = RouterConfig::default();
    cfg.wallet.linked = linked;
    cfg.wallet.balance = 20.0;
    cfg.tokens.vg = 10.0;
    Collaborators::from_config(&cfg)
}

#[tokio::test]
async fn non_positive_amounts_resolve_true_without_processors() {
    for linked in [false, true] {
        let c = collaborators(linked);
        let router = c.router();
        for amount in [0.0, -1.0, -0.01, f64::NEG_INFINITY] {
            let ok = router
                .send_contribution(ContributionType::OneTimeTip, "publisher.test", amount)
                .await
                .unwrap();
            assert!(ok, "amount {amount} should be a satisfied no-op");
        }
        assert_eq!(c.token_processor.call_count(), 0);
        assert_eq!(c.external_processor.call_count(), 0);
    }
}

#[tokio::test]
async fn zero_amount_twice_is_same_as_once() {
    let c = collaborators(false);
    let router = c.router();
    let first = router
        .send_contribution(ContributionType::AutoContribute, "p", 0.0)
        .await
        .unwrap();
    let second = router
        .send_contribution(ContributionType::AutoContribute, "p", 0.0)
        .await
        .unwrap();
    assert!(first && second);
    assert_eq!(c.token_processor.call_count(), 0);
    assert_eq!(c.external_processor.call_count(), 0);
}

#[tokio::test]
async fn unlinked_positive_amount_goes_to_token_processor_only() {
    let c = collaborators(false);
    c.token_processor.set_outcome(false);
    let router = c.router();

    let out = router
        .send_contribution(ContributionType::RecurringTip, "publisher.test", 5.0)
        .await
        .unwrap();

    // Processor outcome comes back verbatim, even when it is `false`.
    assert!(!out);
    assert_eq!(c.external_processor.call_count(), 0);
    assert_eq!(
        c.token_processor.calls(),
        vec![Contribution {
            contribution_type: ContributionType::RecurringTip,
            publisher_id: "publisher.test".into(),
            amount: 5.0,
            source: ContributionSource::InternalTokenBacked,
        }]
    );
}

#[tokio::test]
async fn linked_positive_amount_goes_to_external_processor_only() {
    let c = collaborators(true);
    let router = c.router();

    let out = router
        .send_contribution(ContributionType::OneTimeTip, "publisher.test", 0.25)
        .await
        .unwrap();

    assert!(out);
    assert_eq!(c.token_processor.call_count(), 0);
    let calls = c.external_processor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].source, ContributionSource::ExternalWallet);
    assert_eq!(calls[0].amount, 0.25);
    assert_eq!(calls[0].contribution_type, ContributionType::OneTimeTip);
}

#[tokio::test]
async fn processor_failure_is_propagated_unchanged() {
    let c = collaborators(true);
    c.external_processor.fail_with("payout rejected by custodian");
    let router = c.router();

    let err = router
        .send_contribution(ContributionType::OneTimeTip, "publisher.test", 3.0)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "payout rejected by custodian");
    assert_eq!(c.external_processor.call_count(), 1);
    assert_eq!(c.token_processor.call_count(), 0);
}

#[tokio::test]
async fn routing_is_decided_when_the_call_is_made() {
    let c = collaborators(true);
    let router = c.router();

    let pending = router.send_contribution(ContributionType::OneTimeTip, "publisher.test", 1.0);
    // Unlinking after the call must not reroute the contribution already in flight.
    c.wallet.set_linked(false);
    assert!(pending.await.unwrap());

    assert_eq!(c.external_processor.call_count(), 1);
    assert_eq!(c.token_processor.call_count(), 0);

    // The next call observes the new linkage.
    router
        .send_contribution(ContributionType::OneTimeTip, "publisher.test", 1.0)
        .await
        .unwrap();
    assert_eq!(c.token_processor.call_count(), 1);
}

#[tokio::test]
async fn recorded_source_always_matches_processor_across_interleaved_tasks() {
    let c = Arc::new(collaborators(false));
    let router = c.router();

    let mut handles = Vec::new();
    for i in 0..64u32 {
        let r = router.clone();
        let shared = c.clone();
        handles.push(tokio::spawn(async move {
            shared.wallet.set_linked(i % 2 == 0);
            tokio::task::yield_now().await;
            r.send_contribution(ContributionType::AutoContribute, "publisher.test", 1.0 + i as f64)
                .await
        }));
    }
    for h in handles {
        assert!(h.await.unwrap().unwrap());
    }

    let token_calls = c.token_processor.calls();
    let external_calls = c.external_processor.calls();
    assert_eq!(token_calls.len() + external_calls.len(), 64);
    assert!(token_calls
        .iter()
        .all(|x| x.source == ContributionSource::InternalTokenBacked));
    assert!(external_calls
        .iter()
        .all(|x| x.source == ContributionSource::ExternalWallet));
}
