//! Text always follows spine order, whatever order the manifest lists items in.

mod common;

use common::{EpubBuilder, OPF_MEDIA_TYPE, XHTML, opf, xhtml};
use epub_text::EpubFile;
use proptest::prelude::*;

/// Chapter count, manifest permutation, and which chapters are images.
fn book_shape() -> impl Strategy<Value = (Vec<usize>, Vec<bool>)> {
    (1usize..10).prop_flat_map(|n| {
        (
            Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
            prop::collection::vec(any::<bool>(), n),
        )
    })
}

fn build(manifest_order: &[usize], is_image: &[bool]) -> Vec<u8> {
    let ids: Vec<String> = (0..is_image.len()).map(|i| format!("c{i}")).collect();
    let hrefs: Vec<String> = (0..is_image.len()).map(|i| format!("c{i}.xhtml")).collect();

    let items: Vec<(&str, &str, &str)> = manifest_order
        .iter()
        .map(|&i| {
            let media_type = if is_image[i] { "image/png" } else { XHTML };
            (ids[i].as_str(), hrefs[i].as_str(), media_type)
        })
        .collect();
    let spine: Vec<(&str, &str)> = ids.iter().map(|id| (id.as_str(), "")).collect();

    let mut builder = EpubBuilder::new()
        .container(&[("OEBPS/content.opf", OPF_MEDIA_TYPE)])
        .file("OEBPS/content.opf", opf(&items, &spine));
    for (i, href) in hrefs.iter().enumerate() {
        let heading = format!("Chapter {i}");
        builder = builder.file(&format!("OEBPS/{href}"), xhtml(&[&heading]));
    }
    builder.build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn text_follows_spine_order((manifest_order, is_image) in book_shape()) {
        let epub = EpubFile::from_bytes(build(&manifest_order, &is_image)).unwrap();

        let expected: Vec<String> = is_image
            .iter()
            .enumerate()
            .filter(|&(_, &image)| !image)
            .map(|(i, _)| format!("Chapter {i}"))
            .collect();

        prop_assert_eq!(epub.text().unwrap(), expected.join("\n\n"));
    }
}
