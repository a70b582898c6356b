//! Details view for the phone picked on the search page

use crate::html::{escape, number};
use crate::models::PhoneResult;
use crate::search::ImageSlot;
use crate::storage::PersistenceStore;

/// Navigation target of the "view details" control
pub const DETAILS_PAGE: &str = "phone-details.html";

/// The selected phone, read back from page storage
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView {
    pub phone: PhoneResult,
    pub image: ImageSlot,
}

impl DetailsView {
    /// Load the handed-off phone; `None` when nothing was selected
    pub fn load(store: &PersistenceStore) -> Option<Self> {
        store.load_selected().map(Self::from_phone)
    }

    pub fn from_phone(phone: PhoneResult) -> Self {
        let image = ImageSlot::classify(phone.image_url.as_deref());
        Self { phone, image }
    }

    /// Full-page markup
    pub fn to_html(&self) -> String {
        let phone = &self.phone;
        let reasons: String = phone
            .reasons
            .iter()
            .flatten()
            .map(|reason| format!("<li>{}</li>", escape(reason)))
            .collect();
        let reasons = if reasons.is_empty() {
            String::new()
        } else {
            format!("<ul class=\"reasons\">{}</ul>", reasons)
        };

        format!(
            "<div class=\"phone-details\">{}<h2>{}</h2><p><strong>{}</strong></p>\
             <p>Price: ${}</p><p>Battery: {} mAh</p><p>Camera: {} MP</p><p>RAM: {} MB</p>\
             <p>Match Score: {}%</p>{}</div>",
            self.image.to_html(),
            escape(&phone.name),
            escape(&phone.brand),
            number(phone.price),
            number(phone.battery),
            number(phone.camera_mp),
            number(phone.ram),
            number(phone.match_percentage),
            reasons
        )
    }

    /// Plain-text rendering for terminals
    pub fn to_text(&self) -> String {
        let phone = &self.phone;
        let mut lines = vec![
            format!("{} ({})", phone.name, phone.brand),
            format!("Price:       ${}", number(phone.price)),
            format!("Battery:     {} mAh", number(phone.battery)),
            format!("Camera:      {} MP", number(phone.camera_mp)),
            format!("RAM:         {} MB", number(phone.ram)),
            format!("Match score: {}%", number(phone.match_percentage)),
        ];
        match &self.image {
            ImageSlot::Image { url } => lines.push(format!("Image:       {}", url)),
            ImageSlot::Model3d => {
                if let Some(url) = &phone.image_url {
                    lines.push(format!("3D model:    {}", url));
                }
            }
            ImageSlot::Placeholder => {}
        }
        for reason in phone.reasons.iter().flatten() {
            lines.push(format!("  - {}", reason));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{phone, phone_with_image};

    #[test]
    fn test_load_without_selection_is_none() {
        assert!(DetailsView::load(&PersistenceStore::in_memory()).is_none());
    }

    #[test]
    fn test_load_returns_selected_phone() {
        let store = PersistenceStore::in_memory();
        let selected = phone_with_image("Pixel", Some("https://cdn.example.com/p.webp"));
        store.save_selected(&selected).unwrap();

        let view = DetailsView::load(&store).unwrap();
        assert_eq!(view.phone, selected);
        assert!(matches!(view.image, ImageSlot::Image { .. }));
    }

    #[test]
    fn test_html_lists_reasons() {
        let mut p = phone("Moto", 66.0);
        p.reasons = Some(vec!["Price within budget".to_string(), "<b>".to_string()]);
        let html = DetailsView::from_phone(p).to_html();

        assert!(html.contains("<li>Price within budget</li>"));
        assert!(html.contains("<li>&lt;b&gt;</li>"));
        assert!(html.contains("Match Score: 66%"));
    }

    #[test]
    fn test_text_rendering() {
        let text = DetailsView::from_phone(phone("Moto", 66.0)).to_text();
        assert!(text.starts_with("Moto (TestBrand)"));
        assert!(text.contains("Match score: 66%"));
    }
}
