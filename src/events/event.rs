/// Marker for values that can be published on a [`Bus`](crate::Bus).
///
/// Implemented for every `Send + Sync + 'static` type. `Send + Sync` lets a
/// concurrent delivery move the shared payload to another thread; `'static`
/// is required for a stable [`TypeId`](std::any::TypeId).
pub trait Event: Send + Sync + 'static {}

impl<T> Event for T where T: Send + Sync + 'static {}
