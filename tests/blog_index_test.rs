use anyhow::Result;
use service_pages::core::blog::MissingReason;
use service_pages::{get_all_posts, get_post_by_slug, BlogIndex};
use std::path::Path;
use tempfile::TempDir;

fn write_blog(dir: &Path, manifest: &str, files: &[(&str, &str)]) -> Result<()> {
    std::fs::write(dir.join("index.json"), manifest)?;
    for (name, body) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, body)?;
    }
    Ok(())
}

const MANIFEST: &str = r#"[
    {"slug": "first", "title": "First", "excerpt": "One", "coverImage": "/one.jpg", "file": "posts/first.html"},
    {"slug": "second", "title": "Second", "excerpt": "Two", "file": "posts/second.html"},
    {"slug": "orphan", "title": "Orphan", "excerpt": "No body", "file": "posts/orphan.html"}
]"#;

#[test]
fn test_posts_resolve_with_body() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_blog(
        temp_dir.path(),
        MANIFEST,
        &[("posts/first.html", "<p>first</p>"), ("posts/second.html", "<p>second</p>")],
    )?;
    let index = BlogIndex::new(temp_dir.path());

    let post = index.post_by_slug("first").expect("post should resolve");
    assert_eq!(post.meta.title, "First");
    assert_eq!(post.meta.cover_image.as_deref(), Some("/one.jpg"));
    assert_eq!(post.html, "<p>first</p>");
    Ok(())
}

#[test]
fn test_unknown_slug_is_absent() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_blog(temp_dir.path(), MANIFEST, &[])?;
    let index = BlogIndex::new(temp_dir.path());

    assert!(index.post_by_slug("missing-slug").is_none());
    Ok(())
}

#[test]
fn test_missing_content_file_is_absent() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_blog(temp_dir.path(), MANIFEST, &[("posts/first.html", "<p>first</p>")])?;
    let index = BlogIndex::new(temp_dir.path());

    assert!(index.post_by_slug("orphan").is_none());
    assert!(index.post_by_slug("second").is_none());

    let missing = index.audit();
    let slugs: Vec<&str> = missing.iter().map(|m| m.slug.as_str()).collect();
    assert_eq!(slugs, vec!["second", "orphan"]);
    assert!(missing.iter().all(|m| m.reason == MissingReason::NotFound));
    Ok(())
}

#[test]
fn test_duplicate_slugs_are_reported_and_last_entry_wins() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_blog(
        temp_dir.path(),
        r#"[
            {"slug": "a", "title": "Old", "excerpt": "", "file": "old.html"},
            {"slug": "b", "title": "B", "excerpt": "", "file": "old.html"},
            {"slug": "a", "title": "New", "excerpt": "", "file": "new.html"}
        ]"#,
        &[("old.html", "<p>old</p>"), ("new.html", "<p>new</p>")],
    )?;
    let index = BlogIndex::new(temp_dir.path());

    assert_eq!(index.duplicate_slugs(), vec!["a"]);
    let post = index.post_by_slug("a").expect("post should resolve");
    assert_eq!(post.meta.title, "New");
    assert_eq!(post.html, "<p>new</p>");
    assert!(BlogIndex::new(temp_dir.path().join("none")).duplicate_slugs().is_empty());
    Ok(())
}

#[test]
fn test_all_posts_is_metadata_only_in_manifest_order() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_blog(temp_dir.path(), MANIFEST, &[("posts/first.html", "<p>first</p>")])?;
    let index = BlogIndex::new(temp_dir.path());

    let posts = index.all_posts();
    let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["first", "second", "orphan"]);

    let json = serde_json::to_value(&posts)?;
    for post in json.as_array().unwrap() {
        assert!(post.get("html").is_none());
        assert!(post.get("file").is_none());
    }
    Ok(())
}

#[test]
fn test_manifest_is_cached_for_the_index_lifetime() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_blog(temp_dir.path(), MANIFEST, &[])?;
    let index = BlogIndex::new(temp_dir.path());

    let before = index.all_posts();
    std::fs::write(temp_dir.path().join("index.json"), "[]")?;
    assert_eq!(index.all_posts(), before);
    assert_eq!(before.len(), 3);
    Ok(())
}

#[test]
fn test_absent_manifest_is_empty_blog() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let index = BlogIndex::new(temp_dir.path().join("no-blog-here"));

    assert!(index.all_posts().is_empty());
    assert!(index.post_by_slug("anything").is_none());
    assert!(index.audit().is_empty());
    Ok(())
}

#[test]
fn test_malformed_manifest_is_empty_blog() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_blog(temp_dir.path(), r#"{"posts": []}"#, &[])?;
    assert!(BlogIndex::new(temp_dir.path()).all_posts().is_empty());

    let other = TempDir::new()?;
    write_blog(other.path(), "[{", &[])?;
    assert!(BlogIndex::new(other.path()).all_posts().is_empty());
    Ok(())
}

#[test]
fn test_escaping_file_reference_is_never_read() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let blog_dir = temp_dir.path().join("blog");
    std::fs::create_dir_all(&blog_dir)?;
    std::fs::write(temp_dir.path().join("secret.html"), "secret")?;
    write_blog(
        &blog_dir,
        r#"[{"slug": "sneaky", "title": "S", "excerpt": "", "file": "../secret.html"}]"#,
        &[],
    )?;
    let index = BlogIndex::new(&blog_dir);

    assert!(index.post_by_slug("sneaky").is_none());
    assert_eq!(index.audit()[0].reason, MissingReason::InvalidReference);
    Ok(())
}

#[test]
fn test_process_wide_index_reads_bundled_blog() {
    let posts = get_all_posts();
    assert!(!posts.is_empty());
    assert_eq!(posts, get_all_posts());

    let post = get_post_by_slug(&posts[0].slug).expect("bundled post should resolve");
    assert!(!post.html.is_empty());
    assert!(get_post_by_slug("missing-slug").is_none());
}
