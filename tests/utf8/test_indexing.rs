// Indexing non-ASCII documents end to end

use crate::common::{build_test_index, create_test_services, TestDocs};
use docsift::core::indexer::DocumentIndexer;

#[test]
fn test_multibyte_headings_keep_their_letters() {
    let text = "# 快速开始\n\n安装 CLI。\n\n## Überblick\n\nInhalt.\n\n## 🚀 Launch\n\nGo.\n";
    let index = DocumentIndexer::new(2).index("zh.md", text);

    assert!(index.contains_key("zh.md#快速开始"));
    // Only ASCII capitals are lowered in anchors
    assert!(index.contains_key("zh.md#Überblick"));
    assert_eq!(index["zh.md#快速开始"].body, "安装 CLI。");

    let launch = index
        .keys()
        .find(|k| k.ends_with("launch"))
        .expect("emoji heading indexed");
    assert_eq!(index[launch].title, "🚀 Launch");
}

#[tokio::test]
async fn test_search_over_mixed_script_site() {
    let docs = TestDocs::with_files(&[
        ("README.md", "# Привет мир\n\nДобро пожаловать 👋\n"),
        ("ja.md", "# こんにちは世界\n\n日本語のドキュメント。\n"),
        ("fr.md", "# Café\n\nLe menu du café crème.\n"),
    ]);
    let (services, _index_dir) = create_test_services(docs.path());
    build_test_index(&services, &["README", "ja", "fr"]).await;

    let results = services.search.search("привет");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 3);

    let results = services.search.search("ドキュメント");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "ja.md#こんにちは世界");

    let results = services.search.search("creme");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Cafe");
}
