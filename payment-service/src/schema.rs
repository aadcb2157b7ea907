diesel::table! {
    payment_events (id) {
        id -> Uuid,
        payment_id -> Varchar,
        amount -> Numeric,
        status -> Varchar,
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    payment_projections (id) {
        id -> Varchar,
        amount -> Numeric,
        status -> Varchar,
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    payment_events,
    payment_projections,
);
