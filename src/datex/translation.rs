/// Display label for a coded DATEX II attribute value, if the code is known.
///
/// Matching is exact and case-sensitive.
pub fn label_for_code(code: &str) -> Option<&'static str> {
    let label = match code {
        "damagedVehicle" => "Vehículo Averiado",
        "roadClosed" => "Corte Total",
        "restrictions" => "Restricciones",
        "narrowLanes" => "Estrechamiento de carriles",
        "flooding" => "Inundación",
        "vehicleStuck" => "Vehiculo Parado",
        "both" => "Ambos Sentidos",
        "negative" => "Decreciente",
        "positive" => "Creciente",
        "useUnderSpecifiedRestrictions" => "Uso con restricciones",
        "congested" => "Congestionada",
        "freeFlow" => "Sin retención",
        "constructionWork" => "Obras",
        "impossible" => "Imposible circular",
        "objectOnTheRoad" => "Objeto en Calzada",
        "heavy" => "Retención",
        "vehicleOnFire" => "Vehiculo en llamas",
        "intermittentShortTermClosures" => "Cortes intermitentes",
        "laneClosures" => "Cierre de algún carril",
        "rockfalls" => "Caida de piedras",
        "trafficContolInOperation" => "Itinerario alternativo",
        "laneOrCarriagewayClosed" => "Arcen cerrado",
        _ => return None,
    };
    Some(label)
}

/// Translate a coded value into its display label. Unknown codes are returned unchanged.
pub fn translate(code: &str) -> String {
    label_for_code(code).unwrap_or(code).to_string()
}
