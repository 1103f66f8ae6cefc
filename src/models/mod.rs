mod flight;
mod location;

pub use flight::{FlightOffersResponse, FlightSearchParams, FlightSearchRequest, PassengerCount};
pub use location::{
    LocationsResponse, ProviderAddress, ProviderLocation, ProviderLocations, SuggestionItem,
};
