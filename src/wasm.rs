use crate::{natural_break_classes, natural_breaks};
use js_sys::Array;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

fn inner_vec_to_js_array(data: Vec<f64>) -> Array {
    let array = Array::new();
    for num in data {
        array.push(&JsValue::from_f64(num));
    }
    array
}

// Convert a list of classes to an Array of Arrays suitable for use by a JS function
fn wrapper_vec_to_js_array(data: Vec<Vec<f64>>) -> Array {
    let outer_array = Array::new();
    for inner_vec in data {
        outer_array.push(&inner_vec_to_js_array(inner_vec));
    }
    outer_array
}

/// Class boundaries `[min, break_1, …, max]` for `data`
#[wasm_bindgen]
pub fn jenks_wasm(data: &[f64], nclasses: u8, is_sorted: bool) -> Result<Array, JsError> {
    let res = natural_breaks(data, nclasses, is_sorted)?;
    Ok(inner_vec_to_js_array(res))
}

/// The members of each class of `data`
#[wasm_bindgen]
pub fn jenks_classes_wasm(data: &[f64], nclasses: u8, is_sorted: bool) -> Result<Array, JsError> {
    let res = natural_break_classes(data, nclasses, is_sorted)?;
    Ok(wrapper_vec_to_js_array(res))
}
