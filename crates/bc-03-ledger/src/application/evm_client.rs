//! # EVM Ledger Client
//!
//! Talks to the registry contract through an [`RpcTransport`].
//!
//! ## Write path
//!
//! ```text
//! encode call -> nonce ("pending") -> gas price -> gas estimate (+20%)
//!   -> sign (EIP-155) -> eth_sendRawTransaction -> poll receipt
//! ```
//!
//! Sends are serialised so two concurrent submissions never pick the same
//! nonce. Receipt polling happens outside the lock. The whole sequence of a
//! call is bounded by the configured call timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use primitive_types::U256;
use serde::Deserialize;
use serde_json::{json, Value};
use shared_types::ContentId;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

use crate::config::{ValidatedLedgerConfig, GAS_ESTIMATE_MARGIN_PERCENT};
use crate::domain::abi::{self, ParamType, Token};
use crate::domain::{
    Address, LedgerError, LedgerProject, LedgerSigner, LegacyTransaction, PlatformStats,
    ProjectRef, ProjectRegistration, TxHash, TxRef,
};
use crate::ports::{LedgerApi, RpcTransport};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    status: Option<String>,
    block_number: Option<String>,
    #[serde(default)]
    logs: Vec<RpcLog>,
}

#[derive(Debug, Deserialize)]
struct RpcLog {
    address: String,
    #[serde(default)]
    topics: Vec<String>,
}

/// Mined transaction.
#[derive(Debug)]
struct Receipt {
    tx: TxRef,
    logs: Vec<RpcLog>,
}

/// Ledger client for an EVM registry contract.
pub struct EvmLedgerClient<T: RpcTransport> {
    transport: Arc<T>,
    signer: LedgerSigner,
    contract: Address,
    configured_chain_id: Option<u64>,
    chain_id: OnceCell<u64>,
    send_lock: Mutex<()>,
    call_timeout: Duration,
    poll_interval: Duration,
    gas_limit: Option<u64>,
    gas_price: Option<u128>,
}

impl<T: RpcTransport> EvmLedgerClient<T> {
    pub fn new(transport: Arc<T>, config: ValidatedLedgerConfig) -> Self {
        Self {
            transport,
            signer: config.signer,
            contract: config.contract,
            configured_chain_id: config.chain_id,
            chain_id: OnceCell::new(),
            send_lock: Mutex::new(()),
            call_timeout: config.call_timeout,
            poll_interval: config.receipt_poll_interval,
            gas_limit: config.gas_limit,
            gas_price: config.gas_price,
        }
    }

    /// Run `fut` under the call timeout.
    async fn bounded<R>(
        &self,
        operation: &str,
        fut: impl Future<Output = Result<R, LedgerError>>,
    ) -> Result<R, LedgerError> {
        tokio::time::timeout(self.call_timeout, fut)
            .await
            .map_err(|_| {
                LedgerError::Timeout(format!("{} after {:?}", operation, self.call_timeout))
            })?
    }

    async fn chain_id(&self) -> Result<u64, LedgerError> {
        self.chain_id
            .get_or_try_init(|| async {
                match self.configured_chain_id {
                    Some(id) => Ok(id),
                    None => {
                        let raw = self.transport.call("eth_chainId", json!([])).await?;
                        parse_quantity_u64(&raw, "chain id")
                    }
                }
            })
            .await
            .copied()
    }

    /// Read-only contract call.
    async fn eth_call(&self, data: Vec<u8>) -> Result<Vec<u8>, LedgerError> {
        let params = json!([
            {"to": self.contract.to_string(), "data": to_hex(&data)},
            "latest"
        ]);
        let raw = self.transport.call("eth_call", params).await?;
        parse_bytes(&raw)
    }

    async fn read(
        &self,
        operation: &str,
        call: Vec<u8>,
        outputs: &[ParamType],
    ) -> Result<Vec<Token>, LedgerError> {
        self.bounded(operation, async {
            let data = self.eth_call(call).await?;
            Ok(abi::decode(outputs, &data)?)
        })
        .await
    }

    /// Sign and submit a contract call, then wait until it is mined.
    async fn transact(&self, data: Vec<u8>) -> Result<Receipt, LedgerError> {
        let tx_hash = {
            let _guard = self.send_lock.lock().await;
            let chain_id = self.chain_id().await?;
            let from = self.signer.address().to_string();
            let to = self.contract.to_string();

            let nonce = self
                .transport
                .call("eth_getTransactionCount", json!([from, "pending"]))
                .await?;
            let gas_price = match self.gas_price {
                Some(price) => U256::from(price),
                None => {
                    let raw = self.transport.call("eth_gasPrice", json!([])).await?;
                    parse_quantity(&raw, "gas price")?
                }
            };
            let gas_limit = match self.gas_limit {
                Some(limit) => U256::from(limit),
                None => {
                    let raw = self
                        .transport
                        .call(
                            "eth_estimateGas",
                            json!([{"from": from, "to": to, "data": to_hex(&data)}]),
                        )
                        .await?;
                    let estimate = parse_quantity(&raw, "gas estimate")?;
                    estimate.saturating_mul(U256::from(GAS_ESTIMATE_MARGIN_PERCENT))
                        / U256::from(100)
                }
            };

            let tx = LegacyTransaction {
                nonce: parse_quantity(&nonce, "nonce")?,
                gas_price,
                gas_limit,
                to: self.contract,
                value: U256::zero(),
                data,
                chain_id,
            };
            let (raw, tx_hash) = tx.sign(&self.signer)?;
            self.transport
                .call("eth_sendRawTransaction", json!([to_hex(&raw)]))
                .await?;
            debug!("[bc-03] Sent tx_hash={} nonce={}", tx_hash, tx.nonce);
            tx_hash
        };

        self.wait_for_receipt(tx_hash).await
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<Receipt, LedgerError> {
        loop {
            let polled = self
                .transport
                .call("eth_getTransactionReceipt", json!([tx_hash.to_string()]))
                .await;
            // The transaction is already broadcast; a dropped poll says
            // nothing about whether it gets mined. The call timeout bounds this.
            let raw = match polled {
                Ok(raw) => raw,
                Err(LedgerError::Network(detail)) => {
                    warn!("[bc-03] Receipt poll failed tx_hash={}: {}", tx_hash, detail);
                    tokio::time::sleep(self.poll_interval).await;
                    continue;
                }
                Err(e) => return Err(e.with_tx(&tx_hash)),
            };
            if raw.is_null() {
                tokio::time::sleep(self.poll_interval).await;
                continue;
            }

            let receipt: RpcReceipt = serde_json::from_value(raw).map_err(|e| {
                LedgerError::MalformedResponse(format!("receipt of {}: {}", tx_hash, e))
            })?;
            let block_number = receipt
                .block_number
                .as_deref()
                .map(|b| parse_hex_u64(b, "block number"))
                .transpose()?;
            if receipt.status.as_deref().map(str::trim) == Some("0x0") {
                warn!("[bc-03] Transaction reverted tx_hash={}", tx_hash);
                return Err(LedgerError::Rejected(format!(
                    "transaction {} reverted",
                    tx_hash
                )));
            }
            return Ok(Receipt {
                tx: TxRef {
                    tx_hash,
                    block_number,
                },
                logs: receipt.logs,
            });
        }
    }

    /// Project id from the contract's `ProjectCreated` log.
    fn created_project_id(&self, logs: &[RpcLog]) -> Result<u64, LedgerError> {
        let topic0 = to_hex(&abi::event_topic(abi::PROJECT_CREATED_EVENT));
        let contract = self.contract.to_string();
        let log = logs
            .iter()
            .find(|log| {
                log.address.eq_ignore_ascii_case(&contract)
                    && log.topics.first().is_some_and(|t| t.eq_ignore_ascii_case(&topic0))
            })
            .ok_or_else(|| {
                LedgerError::MalformedResponse("no ProjectCreated event in receipt".to_string())
            })?;
        let id_topic = log.topics.get(1).ok_or_else(|| {
            LedgerError::MalformedResponse("ProjectCreated event without project id".to_string())
        })?;
        let value = parse_hex_u256(id_topic, "project id")?;
        Ok(abi::u256_to_u64(value)?)
    }
}

#[async_trait]
impl<T: RpcTransport + 'static> LedgerApi for EvmLedgerClient<T> {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn register_project(
        &self,
        registration: &ProjectRegistration,
    ) -> Result<ProjectRef, LedgerError> {
        let call = abi::encode_call(
            abi::CREATE_PROJECT,
            &[
                Token::String(registration.name.clone()),
                Token::String(registration.location.clone()),
                Token::Uint(U256::from(registration.area)),
                Token::String(registration.ecosystem_type.clone()),
                Token::String(registration.evidence_ref.clone()),
            ],
        );
        self.bounded("createProject", async {
            let receipt = self.transact(call).await?;
            let project_id = self.created_project_id(&receipt.logs)?;
            info!(
                "[bc-03] ✅ Project registered project_id={} tx_hash={}",
                project_id, receipt.tx.tx_hash
            );
            Ok(ProjectRef {
                project_id,
                tx: receipt.tx,
            })
        })
        .await
    }

    async fn issue_credits(
        &self,
        project: &ProjectRef,
        quantity: u64,
        result_id: &ContentId,
    ) -> Result<TxRef, LedgerError> {
        let call = abi::encode_call(
            abi::VERIFY_AND_ISSUE,
            &[
                Token::Uint(U256::from(project.project_id)),
                Token::Uint(U256::from(quantity)),
                Token::String(result_id.to_string()),
            ],
        );
        self.bounded("verifyProjectAndIssueCredits", async {
            let receipt = self.transact(call).await?;
            info!(
                "[bc-03] ✅ Credits issued project_id={} quantity={} tx_hash={}",
                project.project_id, quantity, receipt.tx.tx_hash
            );
            Ok(receipt.tx)
        })
        .await
    }

    async fn user_projects(&self, owner: Address) -> Result<Vec<u64>, LedgerError> {
        let call = abi::encode_call(abi::GET_USER_PROJECTS, &[Token::Address(owner)]);
        let mut tokens = self
            .read("getUserProjects", call, &[ParamType::UintArray])
            .await?;
        let ids = tokens.remove(0).into_uint_array()?;
        ids.into_iter()
            .map(|id| abi::u256_to_u64(id).map_err(LedgerError::from))
            .collect()
    }

    async fn project(&self, project_id: u64) -> Result<LedgerProject, LedgerError> {
        let call = abi::encode_call(abi::GET_PROJECT, &[Token::Uint(U256::from(project_id))]);
        let outputs = [
            ParamType::Uint,
            ParamType::String,
            ParamType::String,
            ParamType::Address,
            ParamType::Uint,
            ParamType::String,
            ParamType::Uint,
            ParamType::Uint,
            ParamType::Bool,
            ParamType::String,
            ParamType::String,
        ];
        let mut fields = self.read("getProject", call, &outputs).await?.into_iter();
        let mut next = || {
            fields.next().ok_or_else(|| {
                LedgerError::MalformedResponse("getProject returned too few fields".to_string())
            })
        };
        Ok(LedgerProject {
            id: next()?.into_u64()?,
            name: next()?.into_string()?,
            location: next()?.into_string()?,
            owner: next()?.into_address()?,
            area: next()?.into_u64()?,
            ecosystem_type: next()?.into_string()?,
            carbon_credits: next()?.into_u64()?,
            created_at: next()?.into_u64()?,
            is_active: next()?.into_bool()?,
            image_hash: next()?.into_string()?,
            ai_results_hash: next()?.into_string()?,
        })
    }

    async fn platform_stats(&self) -> Result<PlatformStats, LedgerError> {
        let call = abi::encode_call(abi::GET_PLATFORM_STATS, &[]);
        let tokens = self
            .read(
                "getPlatformStats",
                call,
                &[ParamType::Uint, ParamType::Uint, ParamType::Uint],
            )
            .await?;
        let values = tokens
            .into_iter()
            .map(Token::into_u64)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PlatformStats {
            total_projects: values[0],
            total_carbon_credits: values[1],
            total_verified_orgs: values[2],
        })
    }

    async fn is_verified_organization(&self, organization: Address) -> Result<bool, LedgerError> {
        let call = abi::encode_call(abi::IS_VERIFIED_ORGANIZATION, &[Token::Address(organization)]);
        let mut tokens = self
            .read("isVerifiedOrganization", call, &[ParamType::Bool])
            .await?;
        Ok(tokens.remove(0).into_bool()?)
    }

    async fn admin(&self) -> Result<Address, LedgerError> {
        let call = abi::encode_call(abi::ADMIN, &[]);
        let mut tokens = self.read("admin", call, &[ParamType::Address]).await?;
        Ok(tokens.remove(0).into_address()?)
    }

    async fn add_verified_organization(
        &self,
        organization: Address,
    ) -> Result<TxRef, LedgerError> {
        let admin = self.admin().await?;
        if admin != self.signer.address() {
            return Err(LedgerError::Unauthorized(format!(
                "signer {} is not the contract admin {}",
                self.signer.address(),
                admin
            )));
        }
        let call = abi::encode_call(abi::ADD_VERIFIED_ORGANIZATION, &[Token::Address(organization)]);
        self.bounded("addVerifiedOrganization", async {
            let receipt = self.transact(call).await?;
            info!(
                "[bc-03] Organization verified address={} tx_hash={}",
                organization, receipt.tx.tx_hash
            );
            Ok(receipt.tx)
        })
        .await
    }

    fn signer_address(&self) -> Option<Address> {
        Some(self.signer.address())
    }

    fn contract_address(&self) -> Option<Address> {
        Some(self.contract)
    }
}

// =============================================================================
// HEX HELPERS
// =============================================================================

fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn parse_hex_u256(raw: &str, what: &str) -> Result<U256, LedgerError> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| LedgerError::MalformedResponse(format!("{} is not 0x-prefixed: {}", what, raw)))?;
    if digits.is_empty() || digits.len() > 64 {
        return Err(LedgerError::MalformedResponse(format!("invalid {}: {}", what, raw)));
    }
    U256::from_str_radix(digits, 16)
        .map_err(|_| LedgerError::MalformedResponse(format!("invalid {}: {}", what, raw)))
}

fn parse_hex_u64(raw: &str, what: &str) -> Result<u64, LedgerError> {
    let value = parse_hex_u256(raw, what)?;
    Ok(abi::u256_to_u64(value)?)
}

fn parse_quantity(raw: &Value, what: &str) -> Result<U256, LedgerError> {
    let text = raw
        .as_str()
        .ok_or_else(|| LedgerError::MalformedResponse(format!("{} is not a string", what)))?;
    parse_hex_u256(text, what)
}

fn parse_quantity_u64(raw: &Value, what: &str) -> Result<u64, LedgerError> {
    Ok(abi::u256_to_u64(parse_quantity(raw, what)?)?)
}

fn parse_bytes(raw: &Value) -> Result<Vec<u8>, LedgerError> {
    let text = raw
        .as_str()
        .and_then(|s| s.strip_prefix("0x"))
        .ok_or_else(|| LedgerError::MalformedResponse("call result is not 0x hex".to_string()))?;
    hex::decode(text).map_err(|e| LedgerError::MalformedResponse(format!("call result: {}", e)))
}
