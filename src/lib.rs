mod coef;
mod errors;
mod lm;
mod matrix;
mod summary;

pub use crate::{coef::*, errors::*, lm::*, matrix::*, summary::*};
