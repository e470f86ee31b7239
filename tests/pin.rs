mod tests {
    use ws2812_bitbang::chip::{Esp32, Esp32S3, Esp8266};
    use ws2812_bitbang::{InvalidPin, PinDescriptor, PinLayout, TimingStrategy};

    #[test]
    fn test_first_bank() {
        let pin = PinDescriptor::new(0, Esp32::PINS).unwrap();
        assert_eq!((pin.bank(), pin.mask()), (0, 1));

        let pin = PinDescriptor::new(31, Esp32::PINS).unwrap();
        assert_eq!((pin.bank(), pin.mask()), (0, 1 << 31));
    }

    #[test]
    fn test_second_bank() {
        let pin = PinDescriptor::new(32, Esp32::PINS).unwrap();
        assert_eq!((pin.pin(), pin.bank(), pin.mask()), (32, 1, 1));

        let pin = PinDescriptor::new(48, Esp32S3::PINS).unwrap();
        assert_eq!((pin.bank(), pin.mask()), (1, 1 << 16));
    }

    #[test]
    fn test_out_of_range_pin_is_rejected() {
        assert_eq!(PinDescriptor::new(40, Esp32::PINS), Err(InvalidPin(40)));
        assert_eq!(PinDescriptor::new(49, Esp32S3::PINS), Err(InvalidPin(49)));
        assert_eq!(PinDescriptor::new(16, Esp8266::PINS), Err(InvalidPin(16)));
        assert_eq!(PinDescriptor::new(255, Esp8266::PINS), Err(InvalidPin(255)));
    }

    #[test]
    fn test_input_only_pins_are_rejected() {
        for pin in 34..=39 {
            assert_eq!(PinDescriptor::new(pin, Esp32::PINS), Err(InvalidPin(pin)));
        }
        assert!(PinDescriptor::new(33, Esp32::PINS).is_ok());
    }

    #[test]
    fn test_missing_pins_are_rejected() {
        for pin in [20, 24, 28, 29, 30, 31] {
            assert_eq!(PinDescriptor::new(pin, Esp32::PINS), Err(InvalidPin(pin)));
        }
        for pin in 22..=25 {
            assert_eq!(PinDescriptor::new(pin, Esp32S3::PINS), Err(InvalidPin(pin)));
        }
        assert!(PinDescriptor::new(21, Esp32S3::PINS).is_ok());
        assert!(PinDescriptor::new(26, Esp32S3::PINS).is_ok());
    }

    #[test]
    fn test_layout_mask() {
        assert_eq!(Esp8266::PINS.outputs(), 0xFFFF);
        assert_eq!(PinLayout::first(8).without(2, 3).outputs(), 0b1111_0011);
        assert_eq!(PinLayout::first(64).outputs(), u64::MAX);
        assert!(!PinLayout::first(64).contains(64));
        assert_eq!(PinLayout::new(0).banks(), 0);
    }

    #[test]
    fn test_layout_banks() {
        assert_eq!(Esp8266::PINS.banks(), 1);
        assert_eq!(Esp32::PINS.banks(), 2);
        assert_eq!(Esp32S3::PINS.banks(), 2);
        assert_eq!(PinLayout::first(32).banks(), 1);
        assert_eq!(PinLayout::first(33).banks(), 2);
    }
}
