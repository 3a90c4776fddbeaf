use std::sync::Once;
use stencil::doc::{Document, Paragraph, Row, Table};
use stencil::{FieldDescriptor, TemplateSchema};

static INIT: Once = Once::new();

/// Initialize the log backend once for all integration tests.
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Schema of a family reward-return form: scalar fields, a spliced
/// child summary, a signature image, and a dynamic children table.
pub fn reward_schema() -> TemplateSchema {
    TemplateSchema::builder()
        .field(FieldDescriptor::text("name"))
        .field(FieldDescriptor::text("address"))
        .field(FieldDescriptor::text_spliced(
            "childSummary",
            ["子女姓名", "出身日期", "地址"],
        ))
        .field(FieldDescriptor::image("signature", 80.0, 40.0))
        .field(FieldDescriptor::dynamic_row(
            "children",
            ["childName", "birthday"],
        ))
        .build()
        .expect("valid test schema")
}

/// A template document exercising all three placeholder kinds, with the
/// scalar token split across fragments the way an editor round-trip
/// would leave it.
pub fn reward_template() -> Document {
    let mut doc = Document::new();
    doc.push_paragraph(Paragraph::from_fragments(["申请人：", "${na", "me}"]));
    doc.push_paragraph(Paragraph::from_text("家庭住址：${address}"));
    doc.push_paragraph(Paragraph::from_text("子女情况：${childSummary}"));
    doc.push_paragraph(Paragraph::from_fragments(["签名：", "$", "{signature}"]));

    let mut table = Table::default();
    table.rows.push(Row::from_texts(["姓名", "出生日期"]));
    table
        .rows
        .push(Row::from_texts(["${childName}", "${birthday}"]));
    doc.push_table(table);
    doc
}

/// A tiny valid PNG on disk, for image-field values.
pub fn png_on_disk(dir: &tempfile::TempDir) -> std::path::PathBuf {
    use image::{ImageBuffer, Rgb};
    let path = dir.path().join("signature.png");
    let img = ImageBuffer::from_pixel(2, 2, Rgb::<u8>([0, 0, 0]));
    img.save(&path).expect("write test png");
    path
}
