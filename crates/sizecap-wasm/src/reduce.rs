//! Reduction WASM bindings.
//!
//! Entry points the upload page calls after the user picks files and a
//! size budget. Each call builds its own reducer; nothing is shared
//! between calls.
//!
//! # Example
//!
//! ```typescript
//! import { reduce_images } from '@sizecap/wasm';
//!
//! const names = files.map((f) => f.name);
//! const buffers = await Promise.all(files.map(async (f) => new Uint8Array(await f.arrayBuffer())));
//! const results = reduce_images(names, buffers, 1.0, { min_quality: 10 });
//! for (const r of results) {
//!   console.log(r.summary());
//! }
//! ```

use js_sys::{Array, Uint8Array};
use sizecap_core::{ImageSource, ReduceError, Reducer, SearchPolicy};
use wasm_bindgen::prelude::*;

use crate::types::JsReduction;

/// Reduce one uploaded image to fit `budget_mb` megabytes.
///
/// `policy` is an optional partial object of search settings
/// (`initial_quality`, `quality_step`, `min_quality`, `scale_step`,
/// `min_scale`, `filter`); missing fields use the defaults.
///
/// # Errors
///
/// Throws for an invalid budget or policy. Undecodable images are not
/// errors: the returned `JsReduction` carries the message.
#[wasm_bindgen]
pub fn reduce_image(
    bytes: &[u8],
    name: &str,
    budget_mb: f64,
    policy: JsValue,
) -> Result<JsReduction, JsValue> {
    let reducer = build_reducer(budget_mb, parse_policy(policy)?).map_err(to_js_error)?;
    let result = reducer.reduce_one(&ImageSource::memory(name, bytes.to_vec()));
    Ok(JsReduction::from(result))
}

/// Reduce a batch of uploads. `names[i]` labels `files[i]`.
///
/// Returns an array of `JsReduction` in the same order as the input.
///
/// # Errors
///
/// Throws for an invalid budget or policy, an empty batch, mismatched
/// array lengths, or a `files` entry that is not a byte array.
#[wasm_bindgen]
pub fn reduce_images(
    names: Vec<String>,
    files: Array,
    budget_mb: f64,
    policy: JsValue,
) -> Result<Array, JsValue> {
    let reducer = build_reducer(budget_mb, parse_policy(policy)?).map_err(to_js_error)?;

    let mut buffers = Vec::with_capacity(files.length() as usize);
    for value in files.iter() {
        if !value.is_instance_of::<Uint8Array>() {
            return Err(JsValue::from_str("Every file must be a Uint8Array"));
        }
        buffers.push(Uint8Array::new(&value).to_vec());
    }

    let sources = pair_sources(names, buffers)?;
    let results = reducer.reduce_many(&sources).map_err(to_js_error)?;

    Ok(results
        .into_iter()
        .map(|result| JsValue::from(JsReduction::from(result)))
        .collect())
}

fn parse_policy(policy: JsValue) -> Result<Option<SearchPolicy>, JsValue> {
    if policy.is_undefined() || policy.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(policy)
        .map(Some)
        .map_err(|e| JsValue::from_str(&format!("Invalid policy: {}", e)))
}

fn build_reducer(budget_mb: f64, policy: Option<SearchPolicy>) -> Result<Reducer, ReduceError> {
    let reducer = Reducer::new(budget_mb)?;
    match policy {
        Some(policy) => reducer.with_policy(policy),
        None => Ok(reducer),
    }
}

fn pair_sources(names: Vec<String>, buffers: Vec<Vec<u8>>) -> Result<Vec<ImageSource>, String> {
    if names.len() != buffers.len() {
        return Err(format!(
            "Got {} names for {} files",
            names.len(),
            buffers.len()
        ));
    }
    Ok(names
        .into_iter()
        .zip(buffers)
        .map(|(name, bytes)| ImageSource::memory(name, bytes))
        .collect())
}

fn to_js_error(e: ReduceError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
