//! IBGE localidades response types.
//!
//! Only the fields the registration form reads are modelled; the API returns
//! many more (`id`, `regiao`, `microrregiao`, ...) which serde ignores.

use serde::Deserialize;

/// One entry of `GET /estados`.
#[derive(Debug, Clone, Deserialize)]
pub struct IbgeUf {
    pub sigla: String,
}

/// One entry of `GET /estados/{uf}/municipios`.
#[derive(Debug, Clone, Deserialize)]
pub struct IbgeCity {
    pub nome: String,
}
