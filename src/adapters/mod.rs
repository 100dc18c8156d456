// Adapters layer: concrete voucher sources behind the VoucherSource port.

pub mod file_source;
pub mod memory;

pub use file_source::{FileVoucherSource, SourceFormat};
pub use memory::InMemoryVoucherSource;
