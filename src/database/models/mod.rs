pub mod advocate;

pub use advocate::{Advocate, AdvocateRow, AdvocateShapeError, NewAdvocate};
