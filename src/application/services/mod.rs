//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (Notifier) but are themselves
//! concrete structs, not traits.

mod conversion;

pub use conversion::{
    Conversion, ConversionRequest, ConversionService, ConverterFn, ConverterTable,
    TOO_MANY_NODES,
};
