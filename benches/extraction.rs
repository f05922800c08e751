//! Benchmarks for the extraction pipeline.
//!
//! Run with: cargo bench

use std::hint::black_box;
use std::io::{Cursor, Write};

use criterion::{Criterion, criterion_group, criterion_main};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use epub_text::{EpubFile, ParagraphExtractor, TextExtractor};

const CHAPTERS: usize = 40;
const PARAGRAPHS_PER_CHAPTER: usize = 50;

fn chapter(n: usize) -> String {
    let mut html = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <html xmlns=\"http://www.w3.org/1999/xhtml\"><head><title>Chapter</title></head><body>\n",
    );
    html.push_str(&format!("<h1>Chapter {n}</h1>\n"));
    for p in 0..PARAGRAPHS_PER_CHAPTER {
        html.push_str(&format!(
            "<p>Paragraph {p} of chapter {n}, with <em>some</em> inline <a href=\"#x\">markup</a> \
             and enough words to look like prose.</p>\n"
        ));
    }
    html.push_str("</body></html>\n");
    html
}

/// A synthetic book with deflated chapters.
fn sample_epub() -> Vec<u8> {
    let mut manifest = String::new();
    let mut spine = String::new();
    for n in 0..CHAPTERS {
        manifest.push_str(&format!(
            "<item id=\"c{n}\" href=\"c{n}.xhtml\" media-type=\"application/xhtml+xml\"/>\n"
        ));
        spine.push_str(&format!("<itemref idref=\"c{n}\"/>\n"));
    }
    let opf = format!(
        "<?xml version=\"1.0\"?>\n<package xmlns=\"http://www.idpf.org/2007/opf\" version=\"3.0\">\n\
         <manifest>\n{manifest}</manifest>\n<spine>\n{spine}</spine>\n</package>\n"
    );
    let container = "<?xml version=\"1.0\"?>\n\
        <container version=\"1.0\" xmlns=\"urn:oasis:names:tc:opendocument:xmlns:container\">\
        <rootfiles><rootfile full-path=\"OEBPS/content.opf\" \
        media-type=\"application/oebps-package+xml\"/></rootfiles></container>";

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("mimetype", stored).unwrap();
    zip.write_all(b"application/epub+zip").unwrap();
    zip.start_file("META-INF/container.xml", deflated).unwrap();
    zip.write_all(container.as_bytes()).unwrap();
    zip.start_file("OEBPS/content.opf", deflated).unwrap();
    zip.write_all(opf.as_bytes()).unwrap();
    for n in 0..CHAPTERS {
        zip.start_file(format!("OEBPS/c{n}.xhtml"), deflated).unwrap();
        zip.write_all(chapter(n).as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

// ============================================================================
// Archive Benchmarks
// ============================================================================

fn bench_open(c: &mut Criterion) {
    let bytes = sample_epub();

    c.bench_function("open_epub", |b| {
        b.iter(|| EpubFile::from_bytes(black_box(bytes.clone())).unwrap());
    });
}

fn bench_extract_text(c: &mut Criterion) {
    let epub = EpubFile::from_bytes(sample_epub()).unwrap();

    c.bench_function("extract_text", |b| {
        b.iter(|| black_box(epub.text().unwrap()));
    });
}

// ============================================================================
// Markup Benchmarks
// ============================================================================

fn bench_paragraphs(c: &mut Criterion) {
    let html = chapter(0);
    let extractor = ParagraphExtractor::new();

    c.bench_function("extract_paragraphs", |b| {
        b.iter(|| extractor.extract_paragraphs(black_box(html.as_bytes())).unwrap());
    });
}

criterion_group!(benches, bench_open, bench_extract_text, bench_paragraphs);
criterion_main!(benches);
