//! End to end conversion of SVG documents to OpenSCAD text.

use pathscad_scad::{ConvertParams, Converter};
use pathscad_svg::Document;

fn convert(svg: &str, params: ConvertParams) -> String {
    let doc = Document::parse(svg).unwrap();
    let mut out = Vec::new();
    Converter::new(params)
        .convert(&doc, &mut out)
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn rect_to_module_and_call() {
    let params = ConvertParams {
        height: "3".to_string(),
        ..ConvertParams::default()
    };
    let text = convert(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
             <rect id="r1" x="0" y="0" width="10" height="10"/>
           </svg>"#,
        params,
    );
    assert!(text.starts_with("// Module names are of the form poly_"));
    assert!(text.contains("fudge = 0.1;"));
    assert!(text.contains("module poly_r1(h)"));
    assert!(text.contains("scale([25.4/90, -25.4/90, 1]) union()"));
    // vertices are relative to the document center (5,5)
    assert!(text.contains("polygon([[-5,-5],[5,-5],[5,5],[-5,5]]);"));
    assert!(text.contains("poly_r1(3);"));
}

#[test]
fn donut_path_becomes_difference() {
    let text = convert(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
             <path id="ring" d="M 0,0 h 20 v 20 h -20 Z M 5,5 h 10 v 10 h -10 Z"/>
           </svg>"#,
        ConvertParams::default(),
    );
    assert_eq!(text.matches("module ").count(), 1);
    assert!(text.contains("difference()"));
    assert!(text.contains("translate([0, 0, -fudge])"));
    assert!(text.contains("linear_extrude(height=h+2*fudge)"));
    assert!(text.contains("poly_ring(5);"));
}

#[test]
fn disjoint_subpaths_stay_separate_solids() {
    let text = convert(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
             <path id="pair" d="M 0,0 h 5 v 5 h -5 Z M 10,0 h 5 v 5 h -5 Z"/>
           </svg>"#,
        ConvertParams::default(),
    );
    assert!(!text.contains("difference()"));
    assert_eq!(text.matches("linear_extrude(height=h)").count(), 2);
}

#[test]
fn degenerate_shapes_leave_empty_output() {
    let text = convert(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
             <ellipse cx="5" cy="5" rx="3" ry="0"/>
             <line x1="0" y1="0" x2="9" y2="9"/>
           </svg>"#,
        ConvertParams::default(),
    );
    assert!(text.contains("// No valid paths found in the SVG file"));
    assert!(!text.contains("module"));
}

#[test]
fn vertices_are_centered_on_overall_bounds() {
    // two rects spanning x 0..10, y 0..20; center is (5,10)
    let text = convert(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
             <rect id="a" x="0" y="0" width="10" height="10"/>
             <rect id="b" x="0" y="10" width="10" height="10"/>
           </svg>"#,
        ConvertParams::default(),
    );
    assert!(text.contains("polygon([[-5,-10],[5,-10],[5,0],[-5,0]]);"));
    assert!(text.contains("polygon([[-5,0],[5,0],[5,10],[-5,10]]);"));
}

#[test]
fn selection_restricts_converted_shapes() {
    let params = ConvertParams {
        ids: vec!["a".to_string()],
        ..ConvertParams::default()
    };
    let text = convert(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
             <rect id="a" width="5" height="5"/>
             <rect id="b" x="20" width="5" height="5"/>
           </svg>"#,
        params,
    );
    assert!(text.contains("module poly_a(h)"));
    assert!(!text.contains("poly_b"));
}

#[test]
fn selected_group_converts_its_children() {
    let params = ConvertParams {
        ids: vec!["grp".to_string()],
        ..ConvertParams::default()
    };
    let text = convert(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
             <g id="grp">
               <rect id="inner" width="5" height="5"/>
             </g>
             <rect id="outside" x="20" width="5" height="5"/>
           </svg>"#,
        params,
    );
    assert!(text.contains("module poly_inner(h)"));
    assert!(!text.contains("poly_outside"));
}

#[test]
fn shapes_without_ids_get_generated_names() {
    let text = convert(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
             <rect width="5" height="5"/>
             <rect x="10" width="5" height="5"/>
           </svg>"#,
        ConvertParams::default(),
    );
    assert!(text.contains("module poly_0x(h)"));
    assert!(text.contains("module poly_1x(h)"));
    assert!(text.contains("poly_0x(5);"));
    assert!(text.contains("poly_1x(5);"));
}

#[test]
fn transforms_compose_into_vertices() {
    // translate(10,0) moves the square, so the overall bounds span x
    // 10..15 and the centered vertices land symmetric about zero
    let text = convert(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
             <g transform="translate(10,0)">
               <rect id="t" width="5" height="5"/>
             </g>
           </svg>"#,
        ConvertParams::default(),
    );
    assert!(text.contains("polygon([[-2.5,-2.5],[2.5,-2.5],[2.5,2.5],[-2.5,2.5]]);"));
}

#[test]
fn viewbox_scales_user_units() {
    // viewBox is twice the viewport, so user units shrink by half:
    // the rect spans 0..10 after scaling and centers at (5,5)
    let text = convert(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 20 20">
             <rect id="v" width="20" height="20"/>
           </svg>"#,
        ConvertParams::default(),
    );
    assert!(text.contains("polygon([[-5,-5],[5,-5],[5,5],[-5,5]]);"));
}

#[test]
fn smooth_curves_produce_more_vertices() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
         <circle id="c" cx="50" cy="50" r="40"/>
       </svg>"#;
    let coarse = convert(
        svg,
        ConvertParams {
            smoothness: 5.0,
            ..ConvertParams::default()
        },
    );
    let fine = convert(
        svg,
        ConvertParams {
            smoothness: 0.05,
            ..ConvertParams::default()
        },
    );
    let count = |s: &str| s.matches("],[").count();
    assert!(count(&fine) > count(&coarse));
}
