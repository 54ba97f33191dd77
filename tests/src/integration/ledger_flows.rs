//! # Ledger Flows
//!
//! Orchestrator (bc-04) driving the real EVM ledger client (bc-03) over a
//! scripted JSON-RPC transport. Everything above the transport is the
//! production code path: ABI encoding, signing, receipt polling and event
//! decoding.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bc_01_result_store::InMemoryResultStore;
    use bc_02_analysis::MockScorer;
    use bc_03_ledger::domain::abi;
    use bc_03_ledger::{
        EvmLedgerClient, LedgerConfig, LedgerError, LedgerFailureKind, MockRpcTransport,
    };
    use bc_04_submission::{LedgerOutcomeKind, SubmissionApi, SubmissionService};
    use serde_json::Value;
    use shared_types::ProjectId;

    use crate::integration::fixtures::{
        created_receipt, orchestrator, plain_receipt, sample_submission, script_send, CONTRACT,
        DEV_KEY,
    };

    fn evm_orchestrator(
        transport: Arc<MockRpcTransport>,
        credits: u64,
        confidence: f64,
    ) -> SubmissionService {
        let config = LedgerConfig {
            rpc_url: Some("http://127.0.0.1:8545".to_string()),
            private_key: Some(DEV_KEY.to_string()),
            contract_address: Some(CONTRACT.to_string()),
            ..LedgerConfig::for_testing()
        };
        let ledger = EvmLedgerClient::new(transport, config.validate().unwrap());
        orchestrator(
            Arc::new(MockScorer::well_formed(credits, confidence)),
            Arc::new(InMemoryResultStore::new()),
            Arc::new(ledger),
        )
    }

    /// Calldata of the n-th raw transaction sent.
    fn sent_calldata(transport: &MockRpcTransport, n: usize) -> Vec<u8> {
        let sent = transport.params_of("eth_sendRawTransaction");
        let raw = sent[n][0].as_str().unwrap();
        let bytes = hex::decode(&raw[2..]).unwrap();
        rlp::Rlp::new(&bytes).val_at(5).unwrap()
    }

    #[tokio::test]
    async fn test_submission_registers_and_issues_credits() {
        let transport = Arc::new(MockRpcTransport::new());
        script_send(&transport);
        transport
            .respond("eth_getTransactionReceipt", created_receipt(7))
            .respond("eth_getTransactionReceipt", plain_receipt("0x1"));

        let service = evm_orchestrator(transport.clone(), 250, 0.88);
        let outcome = service.submit(sample_submission("evm")).await.unwrap();

        assert_eq!(outcome.project_id, ProjectId::Ledger(7));
        assert_eq!(outcome.ledger.outcome, LedgerOutcomeKind::CreditsIssued);
        assert_eq!(outcome.ledger.credits_issued, Some(250));
        assert_eq!(transport.call_count("eth_sendRawTransaction"), 2);

        let register = sent_calldata(&transport, 0);
        assert_eq!(register[..4], abi::selector(abi::CREATE_PROJECT));
        // area argument: 12.5 ha truncated to 12
        assert_eq!(register[4 + 2 * 32 + 31], 12);

        let issue = sent_calldata(&transport, 1);
        assert_eq!(issue[..4], abi::selector(abi::VERIFY_AND_ISSUE));
        assert_eq!(issue[4 + 31], 7);
        let result_id = outcome.analysis.id.to_string();
        assert!(issue
            .windows(result_id.len())
            .any(|w| w == result_id.as_bytes()));
    }

    #[tokio::test]
    async fn test_low_confidence_registers_without_issuing() {
        let transport = Arc::new(MockRpcTransport::new());
        script_send(&transport);
        transport.respond("eth_getTransactionReceipt", created_receipt(3));

        let service = evm_orchestrator(transport.clone(), 250, 0.5);
        let outcome = service.submit(sample_submission("low")).await.unwrap();

        assert_eq!(outcome.ledger.outcome, LedgerOutcomeKind::Registered);
        assert_eq!(outcome.project_id, ProjectId::Ledger(3));
        assert_eq!(transport.call_count("eth_sendRawTransaction"), 1);
    }

    #[tokio::test]
    async fn test_reverted_registration_degrades_to_local_id() {
        let transport = Arc::new(MockRpcTransport::new());
        script_send(&transport);
        transport.respond("eth_getTransactionReceipt", plain_receipt("0x0"));

        let service = evm_orchestrator(transport.clone(), 250, 0.88);
        let outcome = service.submit(sample_submission("revert")).await.unwrap();

        assert!(outcome.project_id.is_local());
        assert_eq!(outcome.ledger.outcome, LedgerOutcomeKind::RegistrationFailed);
        assert_eq!(
            outcome.ledger.failure.as_ref().unwrap().kind,
            LedgerFailureKind::Rejected
        );
        assert_eq!(transport.call_count("eth_sendRawTransaction"), 1);
    }

    #[tokio::test]
    async fn test_unreachable_node_is_reported_unavailable() {
        let transport = Arc::new(MockRpcTransport::new());
        transport.fail(
            "eth_chainId",
            LedgerError::Network("connection refused".to_string()),
        );

        let service = evm_orchestrator(transport.clone(), 250, 0.88);
        let outcome = service.submit(sample_submission("down")).await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.ledger.outcome, LedgerOutcomeKind::RegistrationFailed);
        assert_eq!(
            outcome.ledger.failure.as_ref().unwrap().kind,
            LedgerFailureKind::Unavailable
        );
        assert_eq!(transport.call_count("eth_sendRawTransaction"), 0);
    }

    #[tokio::test]
    async fn test_failed_issuance_keeps_registration() {
        let transport = Arc::new(MockRpcTransport::new());
        script_send(&transport);
        transport
            .respond("eth_getTransactionReceipt", created_receipt(9))
            .respond("eth_getTransactionReceipt", plain_receipt("0x0"));

        let service = evm_orchestrator(transport, 250, 0.88);
        let outcome = service.submit(sample_submission("issue-revert")).await.unwrap();

        assert_eq!(outcome.project_id, ProjectId::Ledger(9));
        assert_eq!(outcome.ledger.outcome, LedgerOutcomeKind::CreditsFailed);
        assert!(outcome.ledger.registration_tx.is_some());

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["ledger"]["failure"]["kind"], "rejected");
        assert_eq!(json["projectId"], Value::String("9".to_string()));
    }
}
