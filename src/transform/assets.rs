//! Step 5: image paths.

/// Link target prefix used by Docusaurus for files under `static/img/`.
const ROOT_IMAGE_TARGET: &str = "](/img/";

/// Rewrites every `](/img/` link target to `](<prefix>`.
///
/// This is a blind substitution. The prefix is not computed from where the
/// converted file ends up, so it is right for one nesting depth only.
pub fn rewrite_image_paths(input: &str, prefix: &str) -> String {
    input.replace(ROOT_IMAGE_TARGET, &format!("]({prefix}"))
}
