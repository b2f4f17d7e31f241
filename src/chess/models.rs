use serde::Deserialize;

/// Subset of `GET /player/{username}/stats` that the service reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerStats {
    pub chess_rapid: Option<RatingCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingCategory {
    pub last: Option<RatingRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingRecord {
    pub rating: Option<u32>,
}

#[cfg(test)]
impl PlayerStats {
    pub fn mock(rapid: Option<u32>) -> Self {
        Self {
            chess_rapid: Some(RatingCategory {
                last: Some(RatingRecord { rating: rapid }),
            }),
        }
    }
}
