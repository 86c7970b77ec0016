mod address;
mod cuisine;
mod principal;
mod restaurant;
mod review;
mod user;

pub use address::{Address, AddressChanges, NewAddress};
pub use cuisine::{Cuisine, NewCuisine};
pub use principal::{Principal, Role};
pub use restaurant::{NewRestaurant, Restaurant, RestaurantChanges, RestaurantDetail, RestaurantRecord};
pub use review::{check_stars, NewReview, Review, ReviewChanges, ReviewWithAuthor, MAX_STARS, MIN_STARS};
pub use user::{NewUser, UpdateUser, User};
