//! Optional projectile sprite
//!
//! Loaded once at startup. The game never depends on it: without a sprite,
//! projectiles are drawn as a solid dart.

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl SpriteImage {
    /// Wrap raw RGBA8 pixels; `None` if empty or the buffer size is wrong
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if width == 0 || height == 0 || rgba.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba,
        })
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use anyhow::{Context, anyhow};
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

    use super::SpriteImage;

    fn js_error(e: JsValue) -> anyhow::Error {
        anyhow!("{:?}", e)
    }

    /// Fetch an image through the browser and rasterize it to RGBA
    pub async fn load(url: &str) -> anyhow::Result<SpriteImage> {
        let img = HtmlImageElement::new().map_err(js_error)?;

        let loaded = js_sys::Promise::new(&mut |resolve, reject| {
            img.set_onload(Some(&resolve));
            img.set_onerror(Some(&reject));
        });
        img.set_src(url);
        wasm_bindgen_futures::JsFuture::from(loaded)
            .await
            .map_err(|_| anyhow!("image {} failed to load", url))?;

        let (width, height) = (img.natural_width(), img.natural_height());

        // Draw into a scratch canvas to read the pixels back
        let canvas: HtmlCanvasElement = web_sys::window()
            .and_then(|w| w.document())
            .context("no document")?
            .create_element("canvas")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| anyhow!("not a canvas"))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(js_error)?
            .context("no 2d context")?
            .dyn_into()
            .map_err(|_| anyhow!("not a 2d context"))?;
        ctx.draw_image_with_html_image_element(&img, 0.0, 0.0)
            .map_err(js_error)?;
        let data = ctx
            .get_image_data(0.0, 0.0, width as f64, height as f64)
            .map_err(js_error)?;

        SpriteImage::from_rgba(width, height, data.data().0)
            .with_context(|| format!("image {} is empty ({}x{})", url, width, height))
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::load;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba() {
        let sprite = SpriteImage::from_rgba(2, 1, vec![255; 8]).unwrap();
        assert_eq!((sprite.width, sprite.height), (2, 1));
    }

    #[test]
    fn test_from_rgba_rejects_bad_sizes() {
        assert!(SpriteImage::from_rgba(0, 4, Vec::new()).is_none());
        assert!(SpriteImage::from_rgba(2, 2, vec![0; 15]).is_none());
    }
}
