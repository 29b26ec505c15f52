use super::*;

fn frame(width: u32, height: u32) -> I420Planes {
    let luma = (width * height) as usize;
    let chroma = ((width / 2) * (height / 2)) as usize;
    I420Planes {
        y: (0..luma as u16).collect(),
        u: (0..chroma as u16).map(|i| 0x100 + i).collect(),
        v: (0..chroma as u16).map(|i| 0x200 + i).collect(),
    }
}

#[test]
fn chroma_is_interleaved_u_first() {
    let nv12 = convert_i420_to_nv12_10bit(&frame(4, 2), 4, 2).unwrap();
    assert_eq!(nv12.y, (0..8).collect::<Vec<u16>>());
    assert_eq!(nv12.uv, vec![0x100, 0x200, 0x101, 0x201]);
}

#[test]
fn odd_dimensions_round_chroma_down() {
    let src = I420Planes {
        y: vec![7; 15],
        u: vec![1, 2],
        v: vec![3, 4],
    };
    let nv12 = convert_i420_to_nv12_10bit(&src, 5, 3).unwrap();
    assert_eq!(nv12.y.len(), 15);
    assert_eq!(nv12.uv, vec![1, 3, 2, 4]);
}

#[test]
fn short_planes_are_rejected() {
    let mut src = frame(4, 4);
    src.v.pop();
    let err = convert_i420_to_nv12_10bit(&src, 4, 4).unwrap_err();
    assert!(matches!(err, AvgenError::Configuration(_)));
    assert!(err.to_string().contains("V plane"));

    let nv12 = Nv12Planes {
        y: vec![0; 16],
        uv: vec![0; 7],
    };
    assert!(matches!(
        convert_nv12_to_i420_10bit(&nv12, 4, 4),
        Err(AvgenError::Configuration(_))
    ));
}

#[test]
fn split_undoes_interleave() {
    let src = frame(8, 6);
    let nv12 = convert_i420_to_nv12_10bit(&src, 8, 6).unwrap();
    assert_eq!(convert_nv12_to_i420_10bit(&nv12, 8, 6).unwrap(), src);
}
