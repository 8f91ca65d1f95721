use libc::{c_double, c_schar, c_void, size_t};
use std::ptr;
use std::slice;

use crate::{JenksErr, natural_breaks};

/// Wrapper for a void pointer to a sequence of floats, and the sequence length. Used for FFI,
/// both for data to be classified and for the class boundaries handed back.
///
/// `data` is a `Vec<c_double>`. A null `data` pointer is an empty sequence.
#[repr(C)]
pub struct ExternalArray {
    pub data: *const c_void,
    pub len: size_t,
}

impl ExternalArray {
    fn empty() -> Self {
        ExternalArray {
            data: ptr::null(),
            len: 0,
        }
    }
}

/// We don't need to take ownership of incoming data to be classified: that happens in `natural_breaks`
impl From<&ExternalArray> for &[f64] {
    fn from(arr: &ExternalArray) -> Self {
        if arr.data.is_null() {
            return &[];
        }
        unsafe { slice::from_raw_parts(arr.data as *const c_double, arr.len) }
    }
}

// Leak class boundaries across the FFI boundary
impl From<Vec<f64>> for ExternalArray {
    fn from(v: Vec<f64>) -> Self {
        let boxed = v.into_boxed_slice();
        let blen = boxed.len();
        let rawp = Box::into_raw(boxed);
        ExternalArray {
            data: rawp as *const c_void,
            len: blen as size_t,
        }
    }
}

// Reconstitute an array that we leaked so it can be dropped
impl From<ExternalArray> for Vec<f64> {
    fn from(arr: ExternalArray) -> Self {
        if arr.data.is_null() {
            return Vec::new();
        }
        // we originated this data, so pointer-to-slice -> box -> vec
        unsafe {
            let p = ptr::slice_from_raw_parts_mut(arr.data as *mut c_double, arr.len);
            Box::from_raw(p).into_vec()
        }
    }
}

/// Classify `data` into `classes` classes, returning `classes + 1` boundaries.
/// Any failure, including a negative class count, yields a null array of length 0.
#[unsafe(no_mangle)]
pub extern "C" fn jenks_ffi(
    data: &ExternalArray,
    classes: c_schar,
    is_sorted: bool,
) -> ExternalArray {
    let values: &[f64] = data.into();
    let breaks = u8::try_from(classes)
        .map_err(JenksErr::from)
        .and_then(|classes| natural_breaks(values, classes, is_sorted));
    match breaks {
        Ok(breaks) => breaks.into(),
        Err(err) => {
            log::warn!("natural breaks failed: {}", err);
            ExternalArray::empty()
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn drop_jenks_result(result: ExternalArray) {
    let _: Vec<f64> = result.into();
}
