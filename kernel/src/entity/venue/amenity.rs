use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Amenity {
    Sauna,
    Cafe,
    SportsArea,
    Parking,
    Wifi,
}

impl Amenity {
    pub fn label(&self) -> &'static str {
        match self {
            Amenity::Sauna => "Sauna",
            Amenity::Cafe => "Cafe",
            Amenity::SportsArea => "Sports area",
            Amenity::Parking => "Parking",
            Amenity::Wifi => "WiFi",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Amenities {
    pub sauna: bool,
    pub cafe: bool,
    pub sports_area: bool,
    pub parking: bool,
    pub wifi: bool,
}

impl Amenities {
    /// Amenities that are present, in a stable display order.
    pub fn available(&self) -> Vec<Amenity> {
        [
            (self.sauna, Amenity::Sauna),
            (self.cafe, Amenity::Cafe),
            (self.sports_area, Amenity::SportsArea),
            (self.parking, Amenity::Parking),
            (self.wifi, Amenity::Wifi),
        ]
        .into_iter()
        .filter_map(|(present, amenity)| present.then_some(amenity))
        .collect()
    }
}

#[cfg(test)]
mod test {
    use super::{Amenities, Amenity};

    #[test]
    fn available_keeps_display_order() {
        let amenities = Amenities {
            wifi: true,
            sauna: true,
            ..Default::default()
        };
        assert_eq!(amenities.available(), vec![Amenity::Sauna, Amenity::Wifi]);
        assert!(Amenities::default().available().is_empty());
    }
}
