use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServicePackage {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub features: &'static [&'static str],
}
