// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::ModelId;
use super::record::ModelRecord;

pub(crate) fn mid(value: &str) -> ModelId {
    ModelId::new(value).expect("model id")
}

pub(crate) fn model(id: &str, name: &str, model_type: &str) -> ModelRecord {
    ModelRecord::new(mid(id), name, model_type)
        .with_path(format!("/models/{model_type}/{name}.safetensors"))
}

/// Five records crafted so each search branch (name, type, notes) and the type filter can be hit
/// independently.
pub(crate) fn small_library() -> Vec<ModelRecord> {
    vec![
        model("a", "Juggernaut XL", "checkpoint").with_notes("photoreal portraits"),
        model("b", "Detail Tweaker", "lora").with_notes("use at 0.5 weight"),
        model("c", "sdxl-vae-fp16", "vae"),
        model("d", "Anime Lineart", "controlnet").with_notes("pairs with Juggernaut"),
        model("e", "DreamShaper", "Checkpoint"),
    ]
}
