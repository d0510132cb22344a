use async_trait::async_trait;
use serde_json::json;
use std::rc::Rc;
use tracing::debug;
use wp_contract::{Result, RpcTransport, WalletAdapter};
use wp_types::WalletAddress;

/// Account discovery through the standard `eth_accounts` /
/// `eth_requestAccounts` methods.
pub struct Eip1193Wallet<T> {
    transport: Rc<T>,
}

impl<T> Eip1193Wallet<T> {
    pub fn new(transport: Rc<T>) -> Self {
        Self { transport }
    }
}

impl<T: RpcTransport> Eip1193Wallet<T> {
    async fn accounts(&self, method: &str) -> Result<Vec<WalletAddress>> {
        let raw = self.transport.request(method, json!([])).await?;
        let accounts: Vec<String> = serde_json::from_value(raw)?;
        debug!(method, count = accounts.len(), "wallet accounts");
        Ok(accounts.into_iter().map(WalletAddress).collect())
    }
}

#[async_trait(?Send)]
impl<T: RpcTransport> WalletAdapter for Eip1193Wallet<T> {
    async fn authorized_accounts(&self) -> Result<Vec<WalletAddress>> {
        self.accounts("eth_accounts").await
    }

    async fn request_accounts(&self) -> Result<Vec<WalletAddress>> {
        self.accounts("eth_requestAccounts").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use wp_contract::{ContractError, RpcErrorObject};

    #[tokio::test]
    async fn authorized_accounts_does_not_prompt() -> anyhow::Result<()> {
        let transport = Rc::new(ScriptedTransport::default());
        transport.push_ok("eth_accounts", json!(["0xabc"]));
        let wallet = Eip1193Wallet::new(Rc::clone(&transport));

        let accounts = wallet.authorized_accounts().await?;

        assert_eq!(accounts, vec![WalletAddress::from("0xabc")]);
        assert_eq!(transport.methods(), vec!["eth_accounts"]);
        Ok(())
    }

    #[tokio::test]
    async fn request_accounts_surfaces_user_rejection() {
        let transport = Rc::new(ScriptedTransport::default());
        transport.push_err(
            "eth_requestAccounts",
            RpcErrorObject {
                code: 4001,
                message: "User rejected the request.".to_owned(),
            }
            .into(),
        );
        let wallet = Eip1193Wallet::new(transport);

        let err = wallet.request_accounts().await.unwrap_err();
        assert!(matches!(err, ContractError::Rejected(_)));
    }

    #[tokio::test]
    async fn malformed_account_list_is_a_decode_error() {
        let transport = Rc::new(ScriptedTransport::default());
        transport.push_ok("eth_accounts", json!({ "not": "a list" }));
        let wallet = Eip1193Wallet::new(transport);

        let err = wallet.authorized_accounts().await.unwrap_err();
        assert!(matches!(err, ContractError::Decode(_)));
    }
}
