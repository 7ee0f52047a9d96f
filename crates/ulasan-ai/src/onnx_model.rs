//! ONNX Runtime sequence classifier for reviews.
//!
//! Expects a BERT-style binary classifier exported to ONNX. The model
//! directory must contain `model.onnx` and `tokenizer.json`; the model takes
//! `input_ids`, `attention_mask`, `token_type_ids` and returns logits of
//! shape `[1, 2]` (index 0 = Fake, index 1 = Real).

use std::path::Path;

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::info;
use ulasan_core::Label;

use crate::model::{ModelError, ReviewModel, label_from_logits};

/// Longest token sequence fed to the model; longer reviews are truncated.
pub const MAX_SEQUENCE_LENGTH: usize = 512;

/// Review classifier backed by an ONNX Runtime session.
///
/// Load once at startup and hand to the batch driver; the session is reused
/// for every review.
pub struct OnnxReviewModel {
    session: Session,
    tokenizer: Tokenizer,
    name: String,
}

impl OnnxReviewModel {
    /// Load a classifier from a directory containing `model.onnx` and `tokenizer.json`.
    pub fn load(model_dir: &Path) -> Result<Self, ModelError> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            return Err(ModelError::Load(format!(
                "model.onnx not found in {model_dir:?}"
            )));
        }
        if !tokenizer_path.exists() {
            return Err(ModelError::Load(format!(
                "tokenizer.json not found in {model_dir:?}"
            )));
        }

        let builder =
            Session::builder().map_err(|e| ModelError::Load(format!("session builder: {e}")))?;
        let session = builder
            .commit_from_file(&model_path)
            .map_err(|e| ModelError::Load(format!("create session: {e}")))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ModelError::Load(format!("load tokenizer: {e}")))?;

        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_SEQUENCE_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| ModelError::Load(format!("set truncation: {e}")))?;

        tokenizer.with_padding(Some(tokenizers::PaddingParams {
            ..Default::default()
        }));

        let name = model_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "onnx".to_string());

        info!(model = %model_path.display(), max_len = MAX_SEQUENCE_LENGTH, "loaded review classifier");
        Ok(Self {
            session,
            tokenizer,
            name,
        })
    }

    /// Raw logits `[fake, real]` for one review.
    pub fn logits(&mut self, text: &str) -> Result<Vec<f32>, ModelError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ModelError::Tokenize(e.to_string()))?;

        let seq_len = encoding.get_ids().len();
        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&t| t as i64).collect();

        let shape = [1i64, seq_len as i64];
        let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))
            .map_err(|e| ModelError::Inference(format!("input_ids: {e}")))?;
        let mask_tensor = Tensor::from_array((shape, attention_mask.into_boxed_slice()))
            .map_err(|e| ModelError::Inference(format!("attention_mask: {e}")))?;
        let type_tensor = Tensor::from_array((shape, token_type_ids.into_boxed_slice()))
            .map_err(|e| ModelError::Inference(format!("token_type_ids: {e}")))?;

        let outputs = self
            .session
            .run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
                "token_type_ids" => type_tensor,
            ])
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let (output_shape, output_data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::UnexpectedOutput(e.to_string()))?;
        let dims: &[i64] = output_shape;
        if dims != [1i64, 2].as_slice() {
            return Err(ModelError::UnexpectedOutput(format!(
                "logits shape {dims:?}, expected [1, 2]"
            )));
        }

        Ok(output_data.to_vec())
    }
}

impl ReviewModel for OnnxReviewModel {
    fn predict(&mut self, text: &str) -> Result<Label, ModelError> {
        let logits = self.logits(text)?;
        label_from_logits(&logits)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
