//! Parent projections, built in SQL with `json_build_object` and decoded
//! through `#[sqlx(json)]` fields. Each macro takes the table aliases along the
//! relation path, nearest parent first, and expands to a string literal so the
//! select lists can be assembled with `concat!`.

macro_rules! parking_summary {
    ($parking:literal) => {
        concat!(
            "json_build_object('id', ", $parking, ".id, ",
            "'name', ", $parking, ".name, ",
            "'address', ", $parking, ".address, ",
            "'city', ", $parking, ".city)"
        )
    };
}

macro_rules! parking_slot_summary {
    ($slot:literal, $parking:literal) => {
        concat!(
            "json_build_object('id', ", $slot, ".id, ",
            "'number', ", $slot, ".number, ",
            "'parking', ", parking_summary!($parking), ")"
        )
    };
}

macro_rules! sensor_summary {
    ($sensor:literal, $slot:literal, $parking:literal) => {
        concat!(
            "json_build_object('id', ", $sensor, ".id, ",
            "'name', ", $sensor, ".name, ",
            "'type', ", $sensor, ".type, ",
            "'parkingSlot', ", parking_slot_summary!($slot, $parking), ")"
        )
    };
}

macro_rules! parking_sensor_summary {
    ($sensor:literal, $parking:literal) => {
        concat!(
            "json_build_object('id', ", $sensor, ".id, ",
            "'name', ", $sensor, ".name, ",
            "'type', ", $sensor, ".type, ",
            "'parking', ", parking_summary!($parking), ")"
        )
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn nested_projection_follows_the_relation_path() {
        assert_eq!(
            parking_slot_summary!("ps", "p"),
            "json_build_object('id', ps.id, 'number', ps.number, 'parking', \
             json_build_object('id', p.id, 'name', p.name, 'address', p.address, 'city', p.city))"
        );
    }

    #[test]
    fn sensor_projection_embeds_slot_and_parking() {
        let sql = sensor_summary!("s", "ps", "p");
        assert!(sql.starts_with("json_build_object('id', s.id, 'name', s.name, 'type', s.type, "));
        assert!(sql.contains("'parkingSlot', json_build_object('id', ps.id"));
        assert!(sql.ends_with("'city', p.city)))"));
    }
}
