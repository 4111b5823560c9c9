/// One boarded group riding to its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardRide {
    pub destination: u16,
    pub passengers: u8,
    pub boarded_at: u64,
    pub requested_at: u64,
}

/// Fixed set of ride records, one per floor, bounded by a passenger limit.
#[derive(Debug, Clone)]
pub struct OnboardRides {
    rides: Vec<Option<OnboardRide>>,
    max_passengers: u8,
}

impl OnboardRides {
    pub fn new(num_floors: u16, max_passengers: u8) -> Self {
        OnboardRides {
            rides: vec![None; num_floors as usize],
            max_passengers: max_passengers,
        }
    }

    pub fn total_passengers(&self) -> u32 {
        self.rides.iter().flatten().map(|ride| ride.passengers as u32).sum()
    }

    pub fn is_occupied(&self) -> bool {
        self.rides.iter().any(|ride| ride.is_some())
    }

    pub fn can_board(&self, passengers: u8) -> bool {
        self.total_passengers() + passengers as u32 <= self.max_passengers as u32
            && self.rides.iter().any(|ride| ride.is_none())
    }

    /// Stores `ride` in a free record. Returns false if it does not fit.
    pub fn board(&mut self, ride: OnboardRide) -> bool {
        if !self.can_board(ride.passengers) {
            return false
        }
        match self.rides.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(ride);
                true
            },
            None => false,
        }
    }

    /// Frees and returns every ride whose destination is `floor`.
    pub fn drop_off(&mut self, floor: u16) -> Vec<OnboardRide> {
        let mut leaving = Vec::new();
        for slot in self.rides.iter_mut() {
            if slot.map_or(false, |ride| ride.destination == floor) {
                leaving.extend(slot.take());
            }
        }
        leaving
    }
}
