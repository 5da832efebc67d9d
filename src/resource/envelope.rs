//! Envelope around a single fetch attempt

use super::types::Resource;
use crate::error::Result;
use futures::stream::{self, Stream, StreamExt};
use std::future::Future;

/// Wrap a fallible future into a stream of resources.
///
/// The stream yields `Resource::Loading` immediately, then exactly one
/// terminal `Success` or `Error` once the future resolves, then ends.
/// The future is not polled until the loading notification has been taken.
pub fn track<T, Fut>(fut: Fut) -> impl Stream<Item = Resource<T>>
where
    Fut: Future<Output = Result<T>>,
{
    stream::once(async { Resource::Loading })
        .chain(stream::once(async move { Resource::from_result(fut.await) }))
}
