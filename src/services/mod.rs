pub mod archive;
pub mod order_feed;
pub mod order_form;
pub mod receipt_export;

pub use archive::ReceiptArchiver;
pub use order_feed::OrderFeed;
pub use order_form::{OrderForm, OrderPortal};
pub use receipt_export::{ReceiptExporter, ReceiptSink};
