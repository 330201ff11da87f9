//! WASM-compatible wrapper types for reduction results.

use serde::Serialize;
use sizecap_core::ReductionResult;
use wasm_bindgen::prelude::*;

/// One reduced (or failed) image, as seen from JavaScript.
///
/// The encoded bytes stay in WASM memory until `output_bytes()` copies them
/// out. `summary()` returns the plain object the results list renders.
#[wasm_bindgen]
pub struct JsReduction {
    inner: ReductionResult,
}

#[wasm_bindgen]
impl JsReduction {
    /// Name of the uploaded file.
    #[wasm_bindgen(getter)]
    pub fn original_filename(&self) -> String {
        self.inner.original_filename.clone()
    }

    /// Download name of the reduced file, absent on failure.
    #[wasm_bindgen(getter)]
    pub fn output_filename(&self) -> Option<String> {
        self.inner.report().map(|r| r.output_filename.clone())
    }

    /// Failure message, absent on success.
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.inner.error().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn succeeded(&self) -> bool {
        self.inner.is_success()
    }

    /// False when the image failed or could not be brought under budget.
    #[wasm_bindgen(getter)]
    pub fn within_budget(&self) -> bool {
        self.inner.report().is_some_and(|r| r.within_budget)
    }

    /// Reduced JPEG bytes as a `Uint8Array` copy, absent on failure.
    pub fn output_bytes(&self) -> Option<Vec<u8>> {
        self.inner
            .report()
            .and_then(|r| r.bytes())
            .map(<[u8]>::to_vec)
    }

    /// Result record as a plain object: `original_filename` plus either the
    /// size/quality/scale fields or `error`.
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        self.inner
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl From<ReductionResult> for JsReduction {
    fn from(inner: ReductionResult) -> Self {
        Self { inner }
    }
}

impl JsReduction {
    #[allow(dead_code)] // Used by native tests
    pub(crate) fn result(&self) -> &ReductionResult {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::tiny_png;

    #[test]
    fn test_failed_reduction_accessors() {
        let js = JsReduction::from(ReductionResult::failed("x.png", "boom"));

        assert_eq!(js.original_filename(), "x.png");
        assert_eq!(js.error().as_deref(), Some("boom"));
        assert!(!js.succeeded());
        assert!(!js.within_budget());
        assert!(js.output_bytes().is_none());
        assert!(js.output_filename().is_none());
    }

    #[test]
    fn test_successful_reduction_accessors() {
        let result = sizecap_core::reduce_one(&tiny_png(), "dot.png", 1.0).unwrap();
        let js = JsReduction::from(result);

        assert!(js.succeeded());
        assert!(js.within_budget());
        assert!(js.error().is_none());
        assert_eq!(js.output_filename().as_deref(), Some("reduced_dot.jpg"));
        assert_eq!(&js.output_bytes().unwrap()[0..2], &[0xFF, 0xD8]);
        assert!(js.result().is_success());
    }
}
