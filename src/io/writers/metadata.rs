use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::params::CompositeParams;
use crate::core::processing::composite::CompositeImage;
use crate::error::Result;

/// Extract descriptive metadata fields for a rendered composite
pub fn extract_metadata_fields(
    image: &CompositeImage,
    params: &CompositeParams,
    variables: &[String],
) -> HashMap<String, String> {
    let mut metadata = HashMap::new();

    metadata.insert("SOFTWARE".to_string(), format!("truecolor {}", env!("CARGO_PKG_VERSION")));
    metadata.insert(
        "PROCESSED_AT".to_string(),
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    );
    metadata.insert("VARIABLES".to_string(), variables.join(","));
    metadata.insert("CHANNELS".to_string(), "R,G,B,A".to_string());
    metadata.insert("WIDTH".to_string(), image.width().to_string());
    metadata.insert("HEIGHT".to_string(), image.height().to_string());
    metadata.insert("GAMMA".to_string(), params.gamma.to_string());
    metadata.insert("MIN_VAL".to_string(), params.normalize.min_val.to_string());
    metadata.insert("STEEPNESS".to_string(), params.normalize.steepness.to_string());
    metadata.insert("THRESHOLD".to_string(), params.normalize.threshold.to_string());
    metadata.insert(
        "TRANSPARENT_PIXELS".to_string(),
        image.transparent_count().to_string(),
    );

    metadata
}

/// Convert string fields to typed JSON values with lowercase keys
pub fn convert_metadata_to_json(
    metadata: &HashMap<String, String>,
) -> serde_json::Map<String, serde_json::Value> {
    let mut json_metadata = serde_json::Map::new();

    for (key, value) in metadata {
        let json_key = key.to_lowercase();

        // Integers first so counts do not turn into floats
        let json_value = if let Ok(num) = value.parse::<u64>() {
            serde_json::Value::Number(serde_json::Number::from(num))
        } else if let Some(num) = value
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
        {
            serde_json::Value::Number(num)
        } else {
            serde_json::Value::String(value.clone())
        };
        json_metadata.insert(json_key, json_value);
    }

    json_metadata
}

fn number_array(values: &[f64]) -> serde_json::Value {
    serde_json::Value::Array(
        values
            .iter()
            .map(|&v| {
                serde_json::Number::from_f64(v)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            })
            .collect(),
    )
}

/// Handle special JSON fields that need array conversion
pub fn add_special_json_fields(
    json_metadata: &mut serde_json::Map<String, serde_json::Value>,
    image: &CompositeImage,
    geotransform: Option<[f64; 6]>,
) {
    if let (Some(first), Some(last)) = (image.x.first(), image.x.last()) {
        json_metadata.insert("x_range".to_string(), number_array(&[*first, *last]));
    }
    if let (Some(first), Some(last)) = (image.y.first(), image.y.last()) {
        json_metadata.insert("y_range".to_string(), number_array(&[*first, *last]));
    }
    if let Some(gt) = geotransform {
        json_metadata.insert("geotransform".to_string(), number_array(&gt));
    }
}

/// Full metadata document as a JSON string
pub fn metadata_json(
    image: &CompositeImage,
    params: &CompositeParams,
    variables: &[String],
    geotransform: Option<[f64; 6]>,
) -> Result<String> {
    let fields = extract_metadata_fields(image, params, variables);
    let mut json_metadata = convert_metadata_to_json(&fields);
    add_special_json_fields(&mut json_metadata, image, geotransform);
    Ok(serde_json::to_string_pretty(&json_metadata)?)
}

/// Write the metadata document next to the image as `<stem>.json`
pub fn create_metadata_sidecar(
    output_path: &Path,
    image: &CompositeImage,
    params: &CompositeParams,
    variables: &[String],
    geotransform: Option<[f64; 6]>,
) -> Result<PathBuf> {
    let json_string = metadata_json(image, params, variables, geotransform)?;
    let sidecar_path = output_path.with_extension("json");
    std::fs::write(&sidecar_path, json_string)?;
    info!("Created metadata sidecar: {:?}", sidecar_path);
    Ok(sidecar_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn image() -> CompositeImage {
        CompositeImage {
            x: vec![0.0, 1.0],
            y: vec![1.0, 0.0],
            r: array![[1u8, 2], [3, 4]],
            g: array![[1u8, 2], [3, 4]],
            b: array![[1u8, 2], [3, 4]],
            a: array![[255u8, 0], [255, 255]],
        }
    }

    #[test]
    fn json_fields_are_typed() {
        let vars = vec!["red".to_string(), "green".to_string(), "blue".to_string()];
        let text = metadata_json(&image(), &CompositeParams::default(), &vars, None).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["width"], 2);
        assert_eq!(v["transparent_pixels"], 1);
        assert_eq!(v["gamma"], 0.8);
        assert_eq!(v["variables"], "red,green,blue");
        assert_eq!(v["y_range"], serde_json::json!([1.0, 0.0]));
        assert!(v.get("geotransform").is_none());
    }
}
