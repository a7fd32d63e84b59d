//! Correlation id shared by one request or one CLI command.
//!
//! The id sits in tokio task-local storage. Spawned tasks do not inherit it,
//! so work handed to another task has to be wrapped in [`TraceId::scope`]
//! again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

/// Header echoing the id back to HTTP clients.
pub const TRACE_ID_HEADER: &str = "trace-id";

tokio::task_local! {
    static CURRENT: TraceId;
}

/// UUID identifying one unit of work in logs and error payloads.
///
/// # Examples
/// ```
/// use colipass::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id = TraceId::generate();
/// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
/// assert_eq!(TraceId::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random (v4) id.
    #[must_use]
    pub fn generate() -> Self {
        Uuid::new_v4().into()
    }

    /// Id of the enclosing [`TraceId::scope`], if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(Self::clone).ok()
    }

    /// Run `work` with `self` visible through [`TraceId::current`].
    pub fn scope<F: Future>(id: Self, work: F) -> impl Future<Output = F::Output> {
        CURRENT.scope(id, work)
    }

    /// Run synchronous `work` with `id` in scope.
    pub fn sync_scope<R>(id: Self, work: impl FnOnce() -> R) -> R {
        CURRENT.sync_scope(id, work)
    }
}

impl From<Uuid> for TraceId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<TraceId> for Uuid {
    fn from(value: TraceId) -> Self {
        value.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
