use std::fmt::{Display, Formatter};

use tower_lsp::jsonrpc;
use tower_lsp::lsp_types::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// The document is not open (or was closed before the request ran).
    InvalidDocument(Url),
    /// The declaration source failed or produced inconsistent records.
    AdapterFailure(String),
    /// The request was cancelled or its snapshot went stale.
    Cancelled,
}

impl Display for SymbolError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::InvalidDocument(uri) => write!(f, "document is not open: {uri}"),
            Self::AdapterFailure(reason) => write!(f, "failed to collect declarations: {reason}"),
            Self::Cancelled => write!(f, "document symbol request cancelled"),
        }
    }
}

impl std::error::Error for SymbolError {}

impl From<SymbolError> for jsonrpc::Error {
    fn from(error: SymbolError) -> Self {
        match error {
            SymbolError::InvalidDocument(_) => jsonrpc::Error::invalid_params(error.to_string()),
            SymbolError::AdapterFailure(_) => jsonrpc::Error {
                code: jsonrpc::ErrorCode::InternalError,
                message: error.to_string().into(),
                data: None,
            },
            SymbolError::Cancelled => jsonrpc::Error {
                code: jsonrpc::ErrorCode::RequestCancelled,
                message: error.to_string().into(),
                data: None,
            },
        }
    }
}
