pub mod fcm;
pub mod firestore;
pub mod health;
pub mod notification;
pub mod reservation;
pub mod response;
pub mod status;
pub mod validation;
