//! Header artwork: the four contact icons and the logo, loaded from fixed
//! relative paths. Every asset is optional: absent or undecodable files are
//! logged and skipped, and the header renders without them.

use std::path::Path;

use pdf_writer::{Filter, Pdf, Ref};

pub(crate) const ICON_SIZE: f32 = 16.0;

/// Which icon a contact field carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Icon {
    Profile,
    Code,
    Phone,
    Mail,
}

impl Icon {
    pub(crate) const ALL: [Icon; 4] = [Icon::Profile, Icon::Code, Icon::Phone, Icon::Mail];

    fn file_name(self) -> &'static str {
        match self {
            Icon::Profile => "profile.png",
            Icon::Code => "code.png",
            Icon::Phone => "phone.png",
            Icon::Mail => "mail.png",
        }
    }

    fn index(self) -> usize {
        match self {
            Icon::Profile => 0,
            Icon::Code => 1,
            Icon::Phone => 2,
            Icon::Mail => 3,
        }
    }
}

/// A decoded PNG ready for embedding: zlib-compressed RGB samples plus an
/// optional compressed alpha channel for the soft mask.
struct ImageData {
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
    width: u32,
    height: u32,
}

/// The artwork available to a render. Loaded once per render call.
#[derive(Default)]
pub struct Assets {
    icons: [Option<ImageData>; 4],
    logo: Option<ImageData>,
}

impl Assets {
    /// Load icons and logo from `dir`. Never fails; whatever is missing is
    /// simply absent from the result.
    pub fn load(dir: &Path) -> Self {
        let mut assets = Assets::default();
        for icon in Icon::ALL {
            assets.icons[icon.index()] = load_png(&dir.join(icon.file_name()));
        }
        assets.logo = load_png(&dir.join("logo.png"));
        assets
    }

    /// Write every loaded image into the document as an XObject and hand back
    /// the resource names the header draws with.
    pub(crate) fn register(
        &self,
        pdf: &mut Pdf,
        alloc: &mut impl FnMut() -> Ref,
    ) -> EmbeddedAssets {
        let mut embedded = EmbeddedAssets::default();
        for icon in Icon::ALL {
            if let Some(img) = &self.icons[icon.index()] {
                let name = format!("Im{}", embedded.xobjects.len() + 1);
                let xobj_ref = embed_png(pdf, alloc, img);
                embedded.icons[icon.index()] = Some(name.clone());
                embedded.xobjects.push((name, xobj_ref));
            }
        }
        if let Some(img) = &self.logo {
            let name = format!("Im{}", embedded.xobjects.len() + 1);
            let xobj_ref = embed_png(pdf, alloc, img);
            embedded.logo = Some((name.clone(), img.width as f32 / img.height as f32));
            embedded.xobjects.push((name, xobj_ref));
        }
        embedded
    }
}

/// Resource names of the registered artwork, handed to the header renderer.
#[derive(Default)]
pub(crate) struct EmbeddedAssets {
    pub(crate) xobjects: Vec<(String, Ref)>,
    icons: [Option<String>; 4],
    logo: Option<(String, f32)>,
}

impl EmbeddedAssets {
    pub(crate) fn icon(&self, icon: Icon) -> Option<&str> {
        self.icons[icon.index()].as_deref()
    }

    /// Logo resource name and its width/height aspect ratio.
    pub(crate) fn logo(&self) -> Option<(&str, f32)> {
        self.logo.as_ref().map(|(name, aspect)| (name.as_str(), *aspect))
    }
}

fn load_png(path: &Path) -> Option<ImageData> {
    let data = std::fs::read(path).ok()?;
    let reader = image::ImageReader::with_format(
        std::io::BufReader::new(std::io::Cursor::new(&data)),
        image::ImageFormat::Png,
    );
    let decoded = match reader.decode() {
        Ok(decoded) => decoded,
        Err(e) => {
            log::warn!("Skipping asset {}: {e}", path.display());
            return None;
        }
    };

    let rgba = decoded.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    if width == 0 || height == 0 {
        log::warn!("Skipping asset {}: zero-sized image", path.display());
        return None;
    }
    let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

    let rgb_data: Vec<u8> = rgba.pixels().flat_map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
    let rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6);
    let alpha = has_alpha.then(|| {
        let alpha_data: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
        miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, 6)
    });

    Some(ImageData {
        rgb,
        alpha,
        width,
        height,
    })
}

fn embed_png(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref, img: &ImageData) -> Ref {
    let smask_ref = img.alpha.as_ref().map(|alpha| {
        let mask_ref = alloc();
        let mut mask = pdf.image_xobject(mask_ref, alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(img.width as i32);
        mask.height(img.height as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask_ref
    });

    let xobj_ref = alloc();
    let mut xobj = pdf.image_xobject(xobj_ref, &img.rgb);
    xobj.filter(Filter::FlateDecode);
    xobj.width(img.width as i32);
    xobj.height(img.height as i32);
    xobj.color_space().device_rgb();
    xobj.bits_per_component(8);
    if let Some(mask_ref) = smask_ref {
        xobj.s_mask(mask_ref);
    }
    xobj_ref
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_loads_nothing() {
        let assets = Assets::load(Path::new("no/such/dir"));
        assert!(assets.logo.is_none());
        assert!(assets.icons.iter().all(Option::is_none));
    }

    #[test]
    fn broken_png_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.png"), b"not a png").unwrap();
        let assets = Assets::load(dir.path());
        assert!(assets.logo.is_none());
    }
}
