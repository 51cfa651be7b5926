use crate::error::{ApiError, ApiResult};

/// Result of an upstream fetch before it is collapsed at the public boundary.
///
/// `Degraded` keeps the reason so it can be logged and counted; callers of
/// `list_products` / `list_images` only ever see the fallback value.
#[derive(Debug)]
pub enum Fetched<T> {
    Ok(T),
    Degraded(ApiError),
}

impl<T> Fetched<T> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    pub fn reason(&self) -> Option<&ApiError> {
        match self {
            Self::Ok(_) => None,
            Self::Degraded(reason) => Some(reason),
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Degraded(_) => None,
        }
    }

    pub fn unwrap_or_else<F>(self, fallback: F) -> T
    where
        F: FnOnce(ApiError) -> T,
    {
        match self {
            Self::Ok(value) => value,
            Self::Degraded(reason) => fallback(reason),
        }
    }
}

impl<T> From<ApiResult<T>> for Fetched<T> {
    fn from(result: ApiResult<T>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(reason) => Self::Degraded(reason),
        }
    }
}
