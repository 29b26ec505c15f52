use super::*;

#[test]
fn zero_fields_resolve_to_defaults() {
    let r = GeneratorConfig::default().resolved();
    assert_eq!(r.width, 640);
    assert_eq!(r.height, 480);
    assert_eq!(r.fps, 3);
    assert_eq!(r.bit_depth, 8);
    assert_eq!(r.subsampling, Subsampling::Yuv420);
    assert_eq!(r.byte_order, ByteOrder::Little);
    assert_eq!(r.one_color, None);
}

#[test]
fn explicit_fields_are_kept() {
    let cfg = GeneratorConfig {
        width: 64,
        height: 32,
        fps: 25,
        bit_depth: 10,
        ..GeneratorConfig::default()
    };
    let r = cfg.resolved();
    assert_eq!((r.width, r.height, r.fps, r.bit_depth), (64, 32, 25, 10));
    assert_eq!(
        cfg.canvas(),
        Canvas {
            width: 64,
            height: 32
        }
    );
    assert_eq!(cfg.frame_rate().unwrap(), Fps::new(25, 1).unwrap());
}

#[test]
fn partial_json_is_accepted() {
    let cfg = GeneratorConfig::from_json_str(
        r#"{"width": 320, "subsampling": "4:2:2", "byte_order": "big", "one_color": "cyan"}"#,
    )
    .unwrap();
    assert_eq!(cfg.width, 320);
    assert_eq!(cfg.height, 0);
    assert_eq!(cfg.subsampling, Subsampling::Yuv422);
    assert_eq!(cfg.byte_order, ByteOrder::Big);
    assert_eq!(cfg.one_color, Some(BarColor::Cyan));
}

#[test]
fn malformed_json_is_a_configuration_error() {
    let err = GeneratorConfig::from_json_str(r#"{"subsampling": "4:1:1"}"#).unwrap_err();
    assert!(matches!(err, AvgenError::Configuration(_)));
    assert!(err.to_string().starts_with("configuration error:"));
}

#[test]
fn missing_file_is_a_configuration_error() {
    let err = GeneratorConfig::from_path("/nonexistent/avgen.json").unwrap_err();
    assert!(matches!(err, AvgenError::Configuration(_)));
}

#[test]
fn unsupported_bit_depth_falls_back_to_eight() {
    let cfg = GeneratorConfig {
        bit_depth: 9,
        ..GeneratorConfig::default()
    };
    let layout = cfg.layout();
    assert_eq!(layout.bit_depth, BitDepth::Eight);
    assert_eq!(layout.bytes_per_sample, 1);
}
