//! Image work done on the way into storage: shrinking uploaded logos and
//! rendering survey QR codes.

pub mod optimize;
pub mod qr;
