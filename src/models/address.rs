use diesel::prelude::*;

/// Street address owned by exactly one restaurant.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Address {
    pub id: i32,
    pub restaurant_id: i32,
    pub city: Option<String>,
    pub number: Option<String>,
    pub street: Option<String>,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::addresses)]
pub struct NewAddress {
    pub restaurant_id: i32,
    pub city: Option<String>,
    pub number: Option<String>,
    pub street: Option<String>,
}

impl NewAddress {
    pub fn for_restaurant(restaurant_id: i32, fields: AddressChanges) -> Self {
        Self {
            restaurant_id,
            city: fields.city,
            number: fields.number,
            street: fields.street,
        }
    }
}

/// Address fields supplied by a client.
///
/// Used both as the payload for a fresh address and as a changeset that
/// overwrites an existing one; `None` leaves the stored column untouched.
#[derive(Debug, AsChangeset, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = crate::schema::addresses)]
pub struct AddressChanges {
    pub city: Option<String>,
    pub number: Option<String>,
    pub street: Option<String>,
}

impl AddressChanges {
    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.number.is_none() && self.street.is_none()
    }

    /// Applies the supplied fields on top of an existing address.
    pub fn apply_to(self, address: &mut Address) {
        if let Some(city) = self.city {
            address.city = Some(city);
        }
        if let Some(number) = self.number {
            address.number = Some(number);
        }
        if let Some(street) = self.street {
            address.street = Some(street);
        }
    }
}
