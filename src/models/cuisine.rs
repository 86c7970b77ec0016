use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::cuisines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Cuisine {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::cuisines)]
pub struct NewCuisine {
    pub name: String,
}
