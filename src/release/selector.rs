use crate::github::types::{GitHubRelease, ReleaseAsset};

/// Select the zip asset to publish from a release
///
/// With a keyword, the first `.zip` asset whose lowercased name contains the
/// keyword wins. The keyword itself is used as given, so it should be written
/// in lowercase. Without a keyword the first `.zip` asset wins.
pub fn select_asset<'a>(
    release: &'a GitHubRelease,
    keyword: Option<&str>,
) -> Option<&'a ReleaseAsset> {
    let mut zips = release.assets.iter().filter(|asset| asset.is_zip());

    match keyword.filter(|k| !k.is_empty()) {
        Some(keyword) => zips.find(|asset| asset.name.to_lowercase().contains(keyword)),
        None => zips.next(),
    }
}
