use crate::{ConfigRegister, Ds18b20Error, Resolution};
use embedded_hal::delay::DelayNs;
use embedded_onewire::{OneWire, OneWireError};
use log::debug;

/// Pause between two read slots while polling for the end of a conversion.
pub const POLL_INTERVAL_MS: u32 = 1;

/// How to wait for a temperature conversion to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitCondition {
    /// Return at once; the caller times the conversion.
    None,
    /// Issue read slots until the sensor answers 1.
    ///
    /// Not usable with parasite power, where the line must stay strongly
    /// pulled up during the conversion.
    Data,
    /// Sleep for the worst-case conversion time of the configured resolution.
    #[default]
    Delay,
}

/// Block until the conversion started by Convert-T is done.
///
/// Both the delay and the polling budget come from `config`, the configuration
/// the sensor was last known to hold. Polling gives up after the delay of that
/// resolution (the 12-bit delay if it is unknown) and fails with
/// [OneWireError::Timeout]. A fixed delay with an unknown configuration fails
/// without sleeping.
pub fn wait_for_conversion<O: OneWire, D: DelayNs>(
    bus: &mut O,
    delay: &mut D,
    wait: WaitCondition,
    config: ConfigRegister,
) -> Result<(), Ds18b20Error<O::BusError>> {
    match wait {
        WaitCondition::None => Ok(()),
        WaitCondition::Delay => {
            let Some(resolution) = config.resolution() else {
                return Err(Ds18b20Error::UnknownResolution(config.into_bits()));
            };
            delay.delay_ms(resolution.conversion_time_ms());
            Ok(())
        }
        WaitCondition::Data => {
            let budget = config
                .resolution()
                .unwrap_or(Resolution::Bits12)
                .conversion_time_ms();
            let mut waited = 0;
            loop {
                if bus.read_bit()? {
                    debug!("conversion done after ~{waited} ms");
                    return Ok(());
                }
                if waited >= budget {
                    return Err(Ds18b20Error::Bus(OneWireError::Timeout));
                }
                delay.delay_ms(POLL_INTERVAL_MS);
                waited += POLL_INTERVAL_MS;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{RecordingDelay, SimSensor};
    use embedded_hal_mock::eh1::delay::NoopDelay;

    #[test]
    fn none_returns_immediately() {
        let mut sensor = SimSensor::default();
        let mut delay = RecordingDelay::default();
        wait_for_conversion(
            &mut sensor,
            &mut delay,
            WaitCondition::None,
            Resolution::Bits12.into(),
        )
        .unwrap();
        assert!(delay.ms.is_empty());
        assert_eq!(sensor.slots_read, 0);
    }

    #[test]
    fn delay_follows_configured_resolution() {
        for resolution in [
            Resolution::Bits9,
            Resolution::Bits10,
            Resolution::Bits11,
            Resolution::Bits12,
        ] {
            let mut sensor = SimSensor::default();
            let mut delay = RecordingDelay::default();
            wait_for_conversion(&mut sensor, &mut delay, WaitCondition::Delay, resolution.into())
                .unwrap();
            assert_eq!(delay.ms, [resolution.conversion_time_ms()]);
            assert_eq!(sensor.slots_read, 0);
        }
    }

    #[test]
    fn delay_with_unknown_config_fails_without_blocking() {
        let mut sensor = SimSensor::default();
        let mut delay = RecordingDelay::default();
        let err = wait_for_conversion(
            &mut sensor,
            &mut delay,
            WaitCondition::Delay,
            ConfigRegister::from_bits(0x00),
        )
        .unwrap_err();
        assert_eq!(err, Ds18b20Error::UnknownResolution(0x00));
        assert!(delay.ms.is_empty());
    }

    #[test]
    fn data_polls_until_line_released() {
        let mut sensor = SimSensor::default();
        sensor.start_conversion(3);
        let mut delay = RecordingDelay::default();
        wait_for_conversion(
            &mut sensor,
            &mut delay,
            WaitCondition::Data,
            Resolution::Bits12.into(),
        )
        .unwrap();
        assert_eq!(sensor.slots_read, 4);
        assert_eq!(delay.ms, [1, 1, 1]);
    }

    #[test]
    fn data_times_out_after_conversion_time() {
        let mut sensor = SimSensor::default();
        sensor.start_conversion(usize::MAX);
        let err = wait_for_conversion(
            &mut sensor,
            &mut NoopDelay::new(),
            WaitCondition::Data,
            Resolution::Bits9.into(),
        )
        .unwrap_err();
        assert_eq!(err, Ds18b20Error::Bus(OneWireError::Timeout));
        assert_eq!(sensor.slots_read, 95);
    }

    #[test]
    fn data_with_unknown_config_uses_worst_case_budget() {
        let mut sensor = SimSensor::default();
        sensor.start_conversion(usize::MAX);
        let err = wait_for_conversion(
            &mut sensor,
            &mut NoopDelay::new(),
            WaitCondition::Data,
            ConfigRegister::from_bits(0xff),
        )
        .unwrap_err();
        assert_eq!(err, Ds18b20Error::Bus(OneWireError::Timeout));
        assert_eq!(sensor.slots_read, 751);
    }
}
