//! Shared on-disk fixture for the archive tests.

use std::fs;
use std::io;
use std::path::Path;

/// Lays out a small build output directory:
/// `index.html`, `assets/{a.css,a.js}`, `img/{people.png,peoples.png}`,
/// `lv1/lv1.js`, `lv1/lv2/lv2.js`, `lv1/lv2/lv3/lv3.js`.
pub(crate) fn write_fixture(root: &Path) -> io::Result<()> {
    fs::create_dir_all(root.join("assets"))?;
    fs::create_dir_all(root.join("img"))?;
    fs::create_dir_all(root.join("lv1/lv2/lv3"))?;
    fs::write(root.join("index.html"), "<html></html>")?;
    fs::write(root.join("assets/a.css"), "body{}")?;
    fs::write(root.join("assets/a.js"), "console.log('a')")?;
    fs::write(root.join("img/people.png"), [0x89, 0x50, 0x4e, 0x47])?;
    fs::write(root.join("img/peoples.png"), [0x89, 0x50, 0x4e, 0x47, 0x0d])?;
    fs::write(root.join("lv1/lv1.js"), "1")?;
    fs::write(root.join("lv1/lv2/lv2.js"), "2")?;
    fs::write(root.join("lv1/lv2/lv3/lv3.js"), "3")?;
    Ok(())
}
