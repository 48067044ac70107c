use anyhow::{Context, Result};
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
    rpc_config::RpcProgramAccountsConfig,
};
use solana_sdk::{account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::{future::Future, sync::Arc, time::Duration};
use tokio::time::sleep;
use tracing::warn;

/// Limite de `getMultipleAccounts` côté nœud.
pub const MAX_MULTIPLE_ACCOUNTS: usize = 100;

/// Un "wrapper" autour du RpcClient de Solana qui ajoute une logique de
/// ré-essai automatique pour les appels RPC qui échouent à cause d'erreurs réseau temporaires.
/// C'est le seul endroit où l'on ré-essaie : le coeur de calcul n'appelle qu'une fois.
#[derive(Clone)]
pub struct ResilientRpcClient {
    client: Arc<RpcClient>,
    max_retries: u8,
    delay_ms: u64,
}

impl ResilientRpcClient {
    /// Construit un nouveau client RPC résilient (commitment `processed`, comme les lectures de prix).
    pub fn new(rpc_url: String, max_retries: u8, delay_ms: u64) -> Self {
        Self {
            client: Arc::new(RpcClient::new_with_commitment(rpc_url, CommitmentConfig::processed())),
            max_retries,
            delay_ms,
        }
    }

    /// Détermine si une erreur du client est temporaire et si une nouvelle tentative doit être effectuée.
    fn is_retryable(error: &ClientError) -> bool {
        matches!(
            error.kind,
            ClientErrorKind::Reqwest(_) | ClientErrorKind::RpcError(_) | ClientErrorKind::Io(_)
        )
    }

    // Boucle de ré-essai commune à toutes les méthodes.
    async fn with_retries<T, F, Fut>(&self, method: &str, mut call: F) -> std::result::Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, ClientError>>,
    {
        let mut attempt = 0;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if Self::is_retryable(&e) && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(method, attempt, error = %e, "Appel RPC en échec, nouvelle tentative");
                    sleep(Duration::from_millis(self.delay_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    // --- MÉTHODES WRAPPÉES AVEC LOGIQUE DE RÉ-ESSAI ---

    /// Récupère plusieurs comptes, par paquets de `MAX_MULTIPLE_ACCOUNTS`.
    /// Le résultat garde l'ordre de `pubkeys`.
    pub async fn get_multiple_accounts(&self, pubkeys: &[Pubkey]) -> Result<Vec<Option<Account>>> {
        let mut accounts = Vec::with_capacity(pubkeys.len());
        for chunk in pubkeys.chunks(MAX_MULTIPLE_ACCOUNTS) {
            let batch = self
                .with_retries("getMultipleAccounts", || self.client.get_multiple_accounts(chunk))
                .await
                .with_context(|| "Échec final de get_multiple_accounts")?;
            accounts.extend(batch);
        }
        Ok(accounts)
    }

    pub async fn get_program_accounts_with_config(
        &self,
        program_id: &Pubkey,
        config: RpcProgramAccountsConfig,
    ) -> Result<Vec<(Pubkey, Account)>> {
        self.with_retries("getProgramAccounts", || {
            self.client.get_program_accounts_with_config(program_id, config.clone())
        })
        .await
        .with_context(|| {
            format!(
                "Échec final de get_program_accounts_with_config pour le programme {}",
                program_id
            )
        })
    }
}
