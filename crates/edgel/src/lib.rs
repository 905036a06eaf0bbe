#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use edgel_image as image;

#[doc(inline)]
pub use edgel_imgproc as imgproc;
