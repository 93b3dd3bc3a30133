//! Errors raised by the catalog method handlers.

use product_mcp_catalog::CatalogError;
use product_mcp_json_rpc::{FaultDisposition, JsonRpcErrorObject, ProtocolFault, ToJsonRpcError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Protocol(#[from] ProtocolFault),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToJsonRpcError for ServiceError {
    fn disposition(&self) -> FaultDisposition {
        match self {
            // A missing product is a business outcome, not a protocol failure
            ServiceError::Catalog(err) => FaultDisposition::domain_message(err.to_string()),
            ServiceError::Protocol(fault) => fault.disposition(),
            ServiceError::Serialization(err) => {
                FaultDisposition::Protocol(JsonRpcErrorObject::internal_error(&err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_is_a_domain_fault() {
        let err = ServiceError::from(CatalogError::NotFound("999".to_string()));
        assert_eq!(
            err.disposition(),
            FaultDisposition::Domain(json!({"error": "Product not found"}))
        );
    }

    #[test]
    fn test_protocol_faults_stay_protocol_faults() {
        let err = ServiceError::from(ProtocolFault::MissingParam("product_id".to_string()));
        match err.disposition() {
            FaultDisposition::Protocol(error) => assert_eq!(error.code, -32602),
            other => panic!("expected protocol fault, got {:?}", other),
        }
    }
}
