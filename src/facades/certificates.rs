//! Certificates facade
//!
//! Wraps the certificate-manager service: listing a user's winnings and
//! issuing a new certificate to a lottery winner.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::backend::BackendClient;
use crate::models::Certificate;
use crate::utils::errors::{BackendError, QuizPalError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct CertificateDto {
    pub id: i64,
    pub won_on_game_id: i64,
    pub info: String,
    pub spent_on_game_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CertificatesListDto {
    pub certificates: Vec<CertificateDto>,
}

#[derive(Debug, Serialize)]
struct IssueBody {
    game_id: i64,
    user_id: i64,
}

#[derive(Debug, Clone)]
pub struct CertificatesFacade {
    client: BackendClient,
}

impl CertificatesFacade {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// List certificates won by a user
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Certificate>> {
        let dto: CertificatesListDto = self
            .client
            .get(&format!("/v1/users/{}/certificates", user_id))
            .await
            .map_err(QuizPalError::Backend)?;

        Ok(dto.certificates.into_iter().map(map_certificate).collect())
    }

    /// Fetch one certificate by ID
    pub async fn get(&self, certificate_id: i64) -> Result<Certificate> {
        let dto: CertificateDto = self
            .client
            .get(&format!("/v1/certificates/{}", certificate_id))
            .await
            .map_err(|e| match e.reason() {
                Some("certificate_not_found") => {
                    QuizPalError::CertificateNotFound { certificate_id }
                }
                _ => QuizPalError::Backend(e),
            })?;

        Ok(map_certificate(dto))
    }

    /// Issue a certificate to the lottery winner of a passed game
    pub async fn issue(&self, game_id: i64, user_id: i64) -> Result<Certificate> {
        info!(game_id = game_id, user_id = user_id, "Issuing lottery certificate");

        let dto: CertificateDto = self
            .client
            .post("/v1/certificates", &IssueBody { game_id, user_id })
            .await
            .map_err(|e| translate_issue(e, game_id))?;

        Ok(map_certificate(dto))
    }
}

fn map_certificate(dto: CertificateDto) -> Certificate {
    Certificate {
        id: dto.id,
        won_on_game_id: dto.won_on_game_id,
        info: dto.info,
        spent_on_game_id: dto.spent_on_game_id,
    }
}

fn translate_issue(err: BackendError, game_id: i64) -> QuizPalError {
    match err.reason() {
        Some("game_not_found") => QuizPalError::GameNotFound { game_id },
        Some("game_not_passed") => QuizPalError::GameNotPassed { game_id },
        Some("lottery_not_available") => QuizPalError::LotteryNotAvailable { game_id },
        _ => QuizPalError::Backend(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_mapping() {
        let dto = CertificateDto {
            id: 11,
            won_on_game_id: 7,
            info: "Free entry".to_string(),
            spent_on_game_id: None,
        };
        let cert = map_certificate(dto);
        assert!(!cert.is_spent());
        assert_eq!(cert.won_on_game_id, 7);
    }
}
