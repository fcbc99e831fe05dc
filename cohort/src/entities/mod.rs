mod assignment;
mod instance;
mod item;

#[doc(inline)]
pub use assignment::Assignment;

#[doc(inline)]
pub use assignment::AssignmentKey;

#[doc(inline)]
pub use instance::Instance;

#[doc(inline)]
pub use item::Item;
