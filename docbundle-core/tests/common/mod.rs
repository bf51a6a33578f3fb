#![allow(dead_code)]

use docbundle_core::contract::{
    Artifact, MockConcatenator, MockRenderer, Rendition, ServiceError,
};

/// Renders a rendition into an artifact whose content is `document/role/template`.
pub fn echo_renderer() -> MockRenderer {
    let mut renderer = MockRenderer::new();
    renderer.expect_render().returning(|rendition: &Rendition| {
        Ok(Artifact {
            filename: format!("{}.{}", rendition.document, rendition.role),
            content: format!("{}/{}/{}", rendition.document, rendition.role, rendition.template)
                .into_bytes(),
        })
    });
    renderer
}

/// Joins part contents with `|`; rejects an empty part list like a real merge tool.
pub fn joining_concatenator() -> MockConcatenator {
    let mut concatenator = MockConcatenator::new();
    concatenator
        .expect_concatenate()
        .returning(|parts: &[Artifact], output_name: &str| {
            if parts.is_empty() {
                let err: ServiceError = format!("nothing to concatenate into {output_name}").into();
                return Err(err);
            }
            let joined: Vec<String> = parts
                .iter()
                .map(|part| String::from_utf8_lossy(&part.content).into_owned())
                .collect();
            Ok(Artifact {
                filename: output_name.to_string(),
                content: joined.join("|").into_bytes(),
            })
        });
    concatenator
}

/// The `document/role/template` parts that went into a merged artifact.
pub fn parts_of(artifact: &Artifact) -> Vec<String> {
    String::from_utf8_lossy(&artifact.content)
        .split('|')
        .map(str::to_string)
        .collect()
}

/// `document/role` pairs of a rendition list, for compact assertions.
pub fn labels(renditions: &[Rendition]) -> Vec<String> {
    renditions
        .iter()
        .map(|r| format!("{}/{}", r.document, r.role))
        .collect()
}
