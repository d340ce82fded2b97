use std::collections::HashMap;

use url::form_urlencoded::byte_serialize;

use crate::geo::Bounds;

/// Filters accepted by `GET /trucks`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TruckQuery {
    pub bounds: Option<Bounds>,
    pub food: Vec<String>,
    pub name: Option<String>,
}

impl TruckQuery {
    pub fn within(bounds: Bounds) -> Self {
        Self { bounds: Some(bounds), ..Default::default() }
    }

    pub fn with_food<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.food.extend(items.into_iter().map(Into::into).filter(|s: &String| !s.is_empty()));
        self
    }

    /// Reads the decoded query parameters of a request.
    pub fn from_params(params: &HashMap<String, String>) -> anyhow::Result<Self> {
        let bounds = params.get("bounds").map(|b| b.parse::<Bounds>()).transpose()?;
        let food = params
            .get("food")
            .map(|f| f.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect())
            .unwrap_or_default();
        let name = params.get("name").cloned();
        Ok(Self { bounds, food, name })
    }

    /// `?bounds=swLat,swLng,neLat,neLng&food=a,b&name=n`, or an empty string
    /// when there is nothing to filter on. Separating commas stay literal;
    /// the values themselves are percent-encoded.
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(bounds) = &self.bounds {
            pairs.push(format!("bounds={}", bounds));
        }
        if !self.food.is_empty() {
            let items = self.food.iter().map(|f| encode(f)).collect::<Vec<_>>();
            pairs.push(format!("food={}", items.join(",")));
        }
        if let Some(name) = &self.name {
            pairs.push(format!("name={}", encode(name)));
        }
        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}
