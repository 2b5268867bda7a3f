//! Upload URL rewriting, applied to finished HTML.

/// Path prefix of images stored by the upload endpoint.
pub const DEFAULT_UPLOAD_PREFIX: &str = "/upload/";

/// Make upload paths absolute.
///
/// Every `src="{prefix}` becomes `src="{base}{prefix}`. A trailing `/` on
/// `base` is ignored. Sources that do not start with `prefix` are untouched.
pub fn rewrite_upload_urls(html: &str, prefix: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() || prefix.is_empty() {
        return html.to_string();
    }
    let needle = format!("src=\"{}", prefix);
    let replacement = format!("src=\"{}{}", base, prefix);
    html.replace(&needle, &replacement)
}
