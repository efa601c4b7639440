//! Map markers: what the map widget needs to place a visible attraction.

use data_loader::{Attraction, AttractionId, Ownership};
use filter_engine::AnnotatedAttraction;
use serde::Serialize;

const EH_BASE_URL: &str = "http://www.english-heritage.org.uk";

/// Pin icons per ownership tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSet {
    pub eh_property: String,
    pub assoc_attraction: String,
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            eh_property: format!("{EH_BASE_URL}/static/staticNM/icons/pin-single-property.png"),
            assoc_attraction: format!("{EH_BASE_URL}/static/staticNM/icons/pin-single-other.png"),
        }
    }
}

impl IconSet {
    /// Icon for `ownership`; `None` leaves the map's default pin.
    pub fn icon_for(&self, ownership: &Ownership) -> Option<&str> {
        match ownership {
            Ownership::EhProperty => Some(&self.eh_property),
            Ownership::AssocAttraction => Some(&self.assoc_attraction),
            Ownership::Unknown(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: AttractionId,
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Marker {
    /// `None` for records without both coordinates, which can't be placed.
    pub fn from_attraction(attraction: &Attraction, icons: &IconSet) -> Option<Self> {
        let (lat, lng) = attraction.position()?;
        Some(Self {
            id: attraction.id.clone(),
            title: attraction.name.clone(),
            lat,
            lng,
            icon: icons.icon_for(&attraction.ownership).map(str::to_string),
            url: attraction.url.clone(),
        })
    }
}

/// Markers for the visible records that have a position, in list order.
pub fn markers_for(annotated: &[AnnotatedAttraction<'_>], icons: &IconSet) -> Vec<Marker> {
    annotated
        .iter()
        .filter(|a| a.visible)
        .filter_map(|a| Marker::from_attraction(a.attraction, icons))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icons_follow_ownership() {
        let icons = IconSet::default();
        assert!(icons.icon_for(&Ownership::EhProperty).unwrap().ends_with("pin-single-property.png"));
        assert!(icons.icon_for(&Ownership::AssocAttraction).unwrap().ends_with("pin-single-other.png"));
        assert_eq!(icons.icon_for(&Ownership::Unknown("x".into())), None);
    }

    #[test]
    fn test_marker_needs_position() {
        let icons = IconSet::default();
        let placed = Attraction::new("1", "Tintagel", Ownership::EhProperty).with_position(50.66, -4.76);
        let unplaced = Attraction::new("2", "Nowhere", Ownership::EhProperty);

        let marker = Marker::from_attraction(&placed, &icons).unwrap();
        assert_eq!(marker.title, "Tintagel");
        assert_eq!((marker.lat, marker.lng), (50.66, -4.76));
        assert_eq!(marker.icon.as_deref(), Some(icons.eh_property.as_str()));
        assert!(Marker::from_attraction(&unplaced, &icons).is_none());
    }

    #[test]
    fn test_markers_skip_hidden_records() {
        let icons = IconSet::default();
        let a = Attraction::new("1", "Shown", Ownership::EhProperty).with_position(1.0, 2.0);
        let b = Attraction::new("2", "Hidden", Ownership::AssocAttraction).with_position(3.0, 4.0);
        let annotated = vec![
            AnnotatedAttraction { attraction: &a, visible: true },
            AnnotatedAttraction { attraction: &b, visible: false },
        ];

        let markers = markers_for(&annotated, &icons);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].id, "1");
    }

    #[test]
    fn test_marker_json_omits_missing_icon() {
        let attraction =
            Attraction::new("9", "Odd", Ownership::Unknown("other".into())).with_position(1.0, 2.0);
        let marker = Marker::from_attraction(&attraction, &IconSet::default()).unwrap();

        let json = serde_json::to_value(&marker).unwrap();
        assert_eq!(json["title"], "Odd");
        assert!(json.get("icon").is_none());
        assert!(json.get("url").is_none());
    }
}
