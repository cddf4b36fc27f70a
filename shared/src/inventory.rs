//! Inventory filters and the car counters the client keeps in sync.

use crate::{Car, FavoriteToggle};

/// Raw filter inputs as typed by the user. Empty fields are left out of the
/// request; the server does all filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryQuery {
    pub search: String,
    pub brand: String,
    pub price_min: String,
    pub price_max: String,
    pub year_min: String,
    pub year_max: String,
}

impl InventoryQuery {
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let fields = [
            ("search", self.search.trim()),
            ("brand", self.brand.as_str()),
            ("price_min", self.price_min.as_str()),
            ("price_max", self.price_max.as_str()),
            ("year_min", self.year_min.as_str()),
            ("year_max", self.year_max.as_str()),
        ];
        fields.into_iter().filter(|(_, v)| !v.is_empty()).collect()
    }

    pub fn to_query_string(&self) -> String {
        self.params()
            .into_iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn is_empty(&self) -> bool {
        self.params().is_empty()
    }
}

/// Applies the server's favorite result to one car. The count comes from the
/// response, never from incrementing the cached value.
pub fn apply_favorite(car: &mut Car, toggle: FavoriteToggle) {
    car.is_favorite = toggle.favorited;
    car.favorite_count = toggle.favorites;
}

/// Same as [`apply_favorite`] for the matching car in a listing. Returns
/// whether a car was patched.
pub fn apply_favorite_in(cars: &mut [Car], car_id: i64, toggle: FavoriteToggle) -> bool {
    match cars.iter_mut().find(|c| c.id == car_id) {
        Some(car) => {
            apply_favorite(car, toggle);
            true
        }
        None => false,
    }
}

pub fn favorite_label(car: &Car, listing: bool) -> String {
    let verb = match (car.is_favorite, listing) {
        (true, true) => "Favorito",
        (true, false) => "Remover favorito",
        (false, _) => "Favoritar",
    };
    format!("{verb} ({})", car.favorite_count)
}

pub fn favorite_status(toggle: FavoriteToggle, listing: bool) -> &'static str {
    match (toggle.favorited, listing) {
        (true, true) => "Carro adicionado aos favoritos.",
        (true, false) => "Carro favoritado com sucesso.",
        (false, _) => "Favorito removido.",
    }
}
